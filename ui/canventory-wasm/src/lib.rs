//! Canventory browser front end.
//!
//! Pure Rust + WASM. One `AppContext` is built per page load and handed to
//! every page module; each module binds only when its markup is present.

pub mod admin_categories;
pub mod api;
pub mod config;
pub mod confirm_forms;
pub mod dom;
pub mod events;
pub mod logging;
pub mod login;
pub mod modal;
pub mod settings_page;
pub mod storage;
pub mod theme;
pub mod toast;

use std::rc::Rc;

use cv_ui_core::ModalController;
use cv_ui_core::theme::ThemeManager;
use tracing::info;
use wasm_bindgen::prelude::*;

use crate::api::FetchApi;
use crate::config::Config;
use crate::modal::DomDialogSurface;
use crate::storage::LocalPreferences;
use crate::toast::DomToaster;

/// Page-lifetime collaborators, passed explicitly to every binder.
#[derive(Clone)]
pub struct AppContext {
    pub modal: Rc<ModalController<DomDialogSurface>>,
    pub toasts: Rc<DomToaster>,
    pub theme: Rc<ThemeManager<LocalPreferences>>,
    pub api: Rc<FetchApi>,
}

impl AppContext {
    fn new(config: &Config) -> Self {
        let prefers_dark = theme::system_prefers_dark();
        Self {
            api: Rc::new(FetchApi::new(&config.api_base)),
            modal: Rc::new(ModalController::new(DomDialogSurface::bind())),
            toasts: Rc::new(DomToaster::default()),
            theme: Rc::new(ThemeManager::new(LocalPreferences::open(), prefers_dark)),
        }
    }
}

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    init()
}

fn init() -> Result<(), JsValue> {
    let config = Config::from_document();
    logging::init(&config.log_level);

    let ctx = AppContext::new(&config);

    // Shared controllers first, then whatever page-specific markup exists.
    theme::bind(&ctx)?;
    modal::bind(&ctx)?;
    confirm_forms::bind(&ctx)?;

    if dom::by_id(admin_categories::CATEGORY_LIST_ID).is_some() {
        admin_categories::bind(&ctx)?;
    }
    if !dom::query_all(login::TAB_SELECTOR).is_empty() {
        login::bind()?;
    }
    if dom::by_id(settings_page::SETTINGS_ROOT_ID).is_some() {
        settings_page::bind(&ctx)?;
    }

    info!("canventory front end ready");
    Ok(())
}
