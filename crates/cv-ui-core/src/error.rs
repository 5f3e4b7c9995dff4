use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UiError {
    #[error("no dialog is awaiting a result")]
    NoPendingDialog,
    #[error("dialog has no button at index {0}")]
    UnknownButton(usize),
    #[error("category {0} is not in the list")]
    UnknownCategory(i64),
    #[error("{0}")]
    Validation(String),
}

impl UiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("{status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid response: {0}")]
    Decode(String),
}
