//! Settings page: notification toggle, test email, password and email forms.

use cv_ui_core::settings::{EmailChange, PasswordChange, SettingsActions};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlButtonElement, HtmlFormElement, HtmlInputElement};

use crate::AppContext;
use crate::dom;
use crate::events;

pub const SETTINGS_ROOT_ID: &str = "settings-page";
const SENDING_LABEL: &str = "Sending...";

fn input_value(id: &str) -> String {
    dom::by_id_typed::<HtmlInputElement>(id)
        .map(|input| input.value())
        .unwrap_or_default()
}

fn bind_notifications(ctx: &AppContext) -> Result<(), JsValue> {
    let Some(toggle) = dom::by_id_typed::<HtmlInputElement>("notifications-toggle") else {
        return Ok(());
    };
    let ctx = ctx.clone();
    let checkbox = toggle.clone();
    events::listen(&toggle, "change", move |_: web_sys::Event| {
        let ctx = ctx.clone();
        let checkbox = checkbox.clone();
        let enabled = checkbox.checked();
        wasm_bindgen_futures::spawn_local(async move {
            let actions = SettingsActions::new(&*ctx.api, &*ctx.toasts);
            if !actions.set_notifications(enabled).await {
                checkbox.set_checked(!enabled);
            }
        });
    })
}

fn bind_test_email(ctx: &AppContext) -> Result<(), JsValue> {
    let Some(button) = dom::by_id_typed::<HtmlButtonElement>("test-email-btn") else {
        return Ok(());
    };
    let ctx = ctx.clone();
    let trigger = button.clone();
    events::on_click_async(&button, move |_| {
        let ctx = ctx.clone();
        let button = trigger.clone();
        async move {
            if button.disabled() {
                return;
            }
            let label = button.text_content().unwrap_or_default();
            button.set_disabled(true);
            button.set_text_content(Some(SENDING_LABEL));

            SettingsActions::new(&*ctx.api, &*ctx.toasts)
                .send_test_email()
                .await;

            button.set_disabled(false);
            button.set_text_content(Some(&label));
        }
    })
}

fn bind_password_form(ctx: &AppContext) -> Result<(), JsValue> {
    let Some(form) = dom::by_id_typed::<HtmlFormElement>("change-password-form") else {
        return Ok(());
    };
    let ctx = ctx.clone();
    let target = form.clone();
    events::listen(&form, "submit", move |event: web_sys::Event| {
        event.prevent_default();
        let change = PasswordChange {
            current_password: input_value("current-password"),
            new_password: input_value("new-password"),
            confirm_password: input_value("confirm-password"),
        };
        let ctx = ctx.clone();
        let form = target.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let actions = SettingsActions::new(&*ctx.api, &*ctx.toasts);
            if actions.change_password(&change).await {
                form.reset();
            }
        });
    })
}

fn bind_email_form(ctx: &AppContext) -> Result<(), JsValue> {
    let Some(form) = dom::by_id_typed::<HtmlFormElement>("change-email-form") else {
        return Ok(());
    };
    let ctx = ctx.clone();
    let target = form.clone();
    events::listen(&form, "submit", move |event: web_sys::Event| {
        event.prevent_default();
        let change = EmailChange {
            new_email: input_value("new-email"),
            password: input_value("email-password"),
        };
        let ctx = ctx.clone();
        let form = target.clone();
        wasm_bindgen_futures::spawn_local(async move {
            let actions = SettingsActions::new(&*ctx.api, &*ctx.toasts);
            if let Some(email) = actions.change_email(&change).await {
                if let Some(current) = dom::by_id("current-email") {
                    dom::set_text(&current, &email);
                }
                form.reset();
            }
        });
    })
}

pub fn bind(ctx: &AppContext) -> Result<(), JsValue> {
    bind_notifications(ctx)?;
    bind_test_email(ctx)?;
    bind_password_form(ctx)?;
    bind_email_form(ctx)?;
    Ok(())
}
