//! Toast notifications rendered into `#toast-container`.

use cv_ui_core::toast::{Notifier, Toast};
use gloo_timers::future::TimeoutFuture;
use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::dom;

pub const TOAST_CONTAINER_ID: &str = "toast-container";
/// Matches the CSS exit transition.
pub const TOAST_EXIT_MS: u32 = 300;
const TOAST_ENTER_MS: u32 = 10;

#[derive(Default)]
pub struct DomToaster;

impl DomToaster {
    fn container() -> Result<Element, JsValue> {
        if let Some(existing) = dom::by_id(TOAST_CONTAINER_ID) {
            return Ok(existing);
        }
        let container = dom::create_element("div")?;
        container.set_id(TOAST_CONTAINER_ID);
        container.set_class_name("toast-container");
        dom::document()
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?
            .append_child(&container)?;
        Ok(container)
    }

    fn render(toast: &Toast) -> Result<Element, JsValue> {
        let el = dom::create_element("div")?;
        el.set_class_name(&format!("toast {}", toast.kind.css_class()));
        el.set_attribute("role", "status")?;

        let icon = dom::create_element("span")?;
        icon.set_class_name("toast-icon");
        dom::set_text(&icon, toast.kind.icon());

        let message = dom::create_element("span")?;
        message.set_class_name("toast-message");
        dom::set_text(&message, &toast.message);

        el.append_child(&icon)?;
        el.append_child(&message)?;
        Self::container()?.append_child(&el)?;
        Ok(el)
    }
}

impl Notifier for DomToaster {
    fn notify(&self, toast: Toast) {
        let el = match Self::render(&toast) {
            Ok(el) => el,
            Err(err) => {
                warn!("toast '{}' not shown: {:?}", toast.message, err);
                return;
            }
        };
        let visible_ms = u32::try_from(toast.duration.as_millis()).unwrap_or(u32::MAX);

        wasm_bindgen_futures::spawn_local(async move {
            TimeoutFuture::new(TOAST_ENTER_MS).await;
            dom::add_class(&el, "show");
            TimeoutFuture::new(visible_ms).await;
            dom::remove_class(&el, "show");
            TimeoutFuture::new(TOAST_EXIT_MS).await;
            el.remove();
        });
    }
}
