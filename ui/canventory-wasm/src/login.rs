//! Login/register tab switching.

use wasm_bindgen::prelude::*;

use crate::dom;
use crate::events;

pub const TAB_SELECTOR: &str = "[data-tab]";
const REGISTER_HASH: &str = "#register";

/// Mark the tab named `name` and its panel (`#name`) active, all others not.
pub fn set_active_tab(name: &str) {
    for tab in dom::query_all(TAB_SELECTOR) {
        let Some(tab_name) = tab.get_attribute("data-tab") else {
            continue;
        };
        let active = tab_name == name;
        dom::toggle_class(&tab, "active", active);
        if let Some(panel) = dom::by_id(&tab_name) {
            dom::toggle_class(&panel, "active", active);
        }
    }
}

pub fn bind() -> Result<(), JsValue> {
    for tab in dom::query_all(TAB_SELECTOR) {
        let tab_name = tab.get_attribute("data-tab").unwrap_or_default();
        events::listen(&tab, "click", move |event: web_sys::MouseEvent| {
            event.prevent_default();
            set_active_tab(&tab_name);
        })?;
    }

    let hash = gloo_utils::window().location().hash().unwrap_or_default();
    if hash == REGISTER_HASH {
        set_active_tab(REGISTER_HASH.trim_start_matches('#'));
    }
    Ok(())
}
