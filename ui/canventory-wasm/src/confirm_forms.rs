//! Confirm-before-submit for any form carrying `data-confirm`.
//!
//! One delegated `submit` listener on the document covers forms rendered
//! after load as well.

use cv_ui_core::confirm::{CONFIRM_ATTR, ConfirmableForm, SubmitDecision, confirm_submission};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlFormElement;

use crate::AppContext;
use crate::dom;
use crate::events;

pub struct DomForm(pub HtmlFormElement);

impl ConfirmableForm for DomForm {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    /// `HTMLFormElement.submit()` does not fire `submit`, so the interceptor
    /// is not re-entered.
    fn submit(&self) {
        if let Err(err) = self.0.submit() {
            warn!("form submit failed: {:?}", err);
        }
    }
}

pub fn bind(ctx: &AppContext) -> Result<(), JsValue> {
    let modal = ctx.modal.clone();
    events::listen(&dom::document(), "submit", move |event: web_sys::Event| {
        let Some(form) = event
            .target()
            .and_then(|target| target.dyn_into::<HtmlFormElement>().ok())
        else {
            return;
        };
        if !form.has_attribute(CONFIRM_ATTR) {
            return;
        }
        event.prevent_default();

        let modal = modal.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let form = DomForm(form);
            let decision = confirm_submission(&*modal, &form).await;
            if decision == SubmitDecision::Declined {
                debug!("confirmation declined for {}", form.0.action());
            }
        });
    })
}
