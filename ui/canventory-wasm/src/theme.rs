//! Light/dark theme applied to `<html data-theme>`.

use cv_ui_core::theme::Theme;
use tracing::debug;
use wasm_bindgen::prelude::*;
use web_sys::{MediaQueryList, MediaQueryListEvent};

use crate::AppContext;
use crate::dom;
use crate::events;

pub const TOGGLE_SELECTOR: &str = "[data-theme-toggle]";
const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

fn dark_query() -> Option<MediaQueryList> {
    gloo_utils::window().match_media(DARK_QUERY).ok()?
}

pub fn system_prefers_dark() -> bool {
    dark_query().is_some_and(|query| query.matches())
}

pub fn apply(theme: Theme) {
    if let Some(root) = dom::document().document_element() {
        let _ = root.set_attribute("data-theme", theme.as_str());
    }
    for toggle in dom::query_all(TOGGLE_SELECTOR) {
        dom::set_text(&toggle, theme.toggle_icon());
    }
}

pub fn bind(ctx: &AppContext) -> Result<(), JsValue> {
    apply(ctx.theme.current());

    for toggle in dom::query_all(TOGGLE_SELECTOR) {
        let theme = ctx.theme.clone();
        events::listen(&toggle, "click", move |_: web_sys::MouseEvent| {
            let next = theme.toggle();
            debug!("theme toggled to {}", next);
            apply(next);
        })?;
    }

    if let Some(query) = dark_query() {
        let theme = ctx.theme.clone();
        events::listen(&query, "change", move |event: MediaQueryListEvent| {
            if let Some(next) = theme.system_preference_changed(event.matches()) {
                apply(next);
            }
        })?;
    }
    Ok(())
}
