//! DOM surface for the shared modal controller.
//!
//! Expected markup:
//!
//! ```html
//! <div id="modal-overlay" class="modal-overlay">
//!   <div id="modal-container" class="modal">
//!     <div id="modal-icon"></div>
//!     <h2 id="modal-title"></h2>
//!     <p id="modal-subtitle"></p>
//!     <p id="modal-message"></p>
//!     <div id="modal-actions"></div>
//!   </div>
//! </div>
//! ```

use cv_ui_core::modal::{DialogRequest, DialogSurface};
use gloo_timers::callback::Timeout;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent};

use crate::AppContext;
use crate::dom;
use crate::events;

pub const OVERLAY_ID: &str = "modal-overlay";
const ACTIONS_ID: &str = "modal-actions";
const BUTTON_INDEX_ATTR: &str = "data-index";
const SCROLL_HOLDER: &str = "dialog";
/// Lets the browser lay out the new buttons before focusing one.
const FOCUS_DELAY_MS: u32 = 50;

pub struct DomDialogSurface {
    overlay: Element,
    container: Element,
    icon: Element,
    title: Element,
    subtitle: Element,
    message: Element,
    actions: Element,
}

impl DomDialogSurface {
    /// `None` when the page has no modal overlay.
    pub fn bind() -> Option<Self> {
        let overlay = dom::by_id(OVERLAY_ID)?;
        let part = |id: &str| {
            let el = dom::by_id(id);
            if el.is_none() {
                warn!("modal overlay present but #{} missing", id);
            }
            el
        };
        Some(Self {
            container: part("modal-container")?,
            icon: part("modal-icon")?,
            title: part("modal-title")?,
            subtitle: part("modal-subtitle")?,
            message: part("modal-message")?,
            actions: part(ACTIONS_ID)?,
            overlay,
        })
    }

    fn render_buttons(&self, request: &DialogRequest) -> Result<(), JsValue> {
        self.actions.set_inner_html("");
        for (index, choice) in request.buttons.iter().enumerate() {
            let button = dom::create_element("button")?;
            button.set_attribute("type", "button")?;
            button.set_attribute(BUTTON_INDEX_ATTR, &index.to_string())?;
            button.set_class_name(&format!("btn {}", choice.style.css_class()));
            dom::set_text(&button, &choice.label);
            self.actions.append_child(&button)?;
        }
        Ok(())
    }
}

impl DialogSurface for DomDialogSurface {
    fn render(&self, request: &DialogRequest) {
        self.container
            .set_class_name(&format!("modal {}", request.kind.css_class()));
        dom::set_text(&self.icon, request.icon());
        dom::set_text(&self.title, &request.title);

        match request.visible_subtitle() {
            Some(subtitle) => {
                dom::set_text(&self.subtitle, subtitle);
                dom::set_hidden(&self.subtitle, false);
            }
            None => {
                dom::set_text(&self.subtitle, "");
                dom::set_hidden(&self.subtitle, true);
            }
        }

        dom::set_text(&self.message, &request.message);
        if let Err(err) = self.render_buttons(request) {
            warn!("could not render dialog buttons: {:?}", err);
        }

        dom::add_class(&self.overlay, "active");
        dom::lock_scroll(SCROLL_HOLDER, true);
    }

    fn hide(&self) {
        dom::remove_class(&self.overlay, "active");
        dom::lock_scroll(SCROLL_HOLDER, false);
    }

    fn focus_button(&self, index: usize) {
        let selector = format!("button[{BUTTON_INDEX_ATTR}=\"{index}\"]");
        let Some(button) = dom::query_within_typed::<HtmlElement>(&self.actions, &selector) else {
            return;
        };
        Timeout::new(FOCUS_DELAY_MS, move || {
            let _ = button.focus();
        })
        .forget();
    }
}

/// Route overlay clicks, Escape and button clicks into the controller.
pub fn bind(ctx: &AppContext) -> Result<(), JsValue> {
    if !ctx.modal.is_bound() {
        return Ok(());
    }
    let (Some(overlay), Some(actions)) = (dom::by_id(OVERLAY_ID), dom::by_id(ACTIONS_ID)) else {
        return Ok(());
    };

    let modal = ctx.modal.clone();
    let overlay_target = overlay.clone();
    events::listen(&overlay, "click", move |event: MouseEvent| {
        // Only the backdrop itself; clicks inside the dialog bubble up here too.
        let on_backdrop = event
            .target()
            .is_some_and(|target| AsRef::<JsValue>::as_ref(&target) == AsRef::<JsValue>::as_ref(&overlay_target));
        if on_backdrop && modal.overlay_clicked() {
            debug!("dialog dismissed by overlay click");
        }
    })?;

    let modal = ctx.modal.clone();
    events::listen(&dom::document(), "keydown", move |event: KeyboardEvent| {
        if modal.handle_key(&event.key()) {
            event.prevent_default();
        }
    })?;

    let modal = ctx.modal.clone();
    events::listen(&actions, "click", move |event: MouseEvent| {
        let Some(button) = dom::closest(event.target(), &format!("button[{BUTTON_INDEX_ATTR}]")) else {
            return;
        };
        let Some(index) = button
            .get_attribute(BUTTON_INDEX_ATTR)
            .and_then(|raw| raw.parse::<usize>().ok())
        else {
            return;
        };
        if let Err(err) = modal.activate(index) {
            warn!("dialog button {}: {}", index, err);
        }
    })?;

    Ok(())
}
