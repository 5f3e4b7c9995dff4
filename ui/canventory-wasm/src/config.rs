//! Page configuration, read from `<body>` data attributes.
//!
//! - `data-api-base`: prefix for backend routes; empty means same origin.
//! - `data-log-level`: `tracing` filter directive, default `info`.

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Config {
    pub fn from_document() -> Self {
        let Some(body) = gloo_utils::document().body() else {
            return Self::default();
        };
        let attr = |name: &str| {
            body.get_attribute(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            api_base: attr("data-api-base")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_default(),
            log_level: attr("data-log-level").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}
