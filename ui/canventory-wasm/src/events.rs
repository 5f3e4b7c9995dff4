//! Event listener plumbing.
//!
//! Listeners live for the whole page, so closures are leaked with
//! `forget()` once attached.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::WasmClosure;
use wasm_bindgen::prelude::*;
use web_sys::EventTarget;

/// Attach `handler` for `event` on `target`.
pub fn listen<E>(target: &EventTarget, event: &str, handler: impl FnMut(E) + 'static) -> Result<(), JsValue>
where
    E: 'static,
    dyn FnMut(E): WasmClosure,
{
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(E)>);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Attach a click handler that spawns an async task per click.
pub fn on_click_async<F, Fut>(target: &EventTarget, mut handler: F) -> Result<(), JsValue>
where
    F: FnMut(web_sys::MouseEvent) -> Fut + 'static,
    Fut: std::future::Future<Output = ()> + 'static,
{
    listen(target, "click", move |event: web_sys::MouseEvent| {
        wasm_bindgen_futures::spawn_local(handler(event));
    })
}
