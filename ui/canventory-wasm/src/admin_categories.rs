//! Admin category panel: emoji pickers, edit modal, delete prompts and
//! drag-and-drop ordering.
//!
//! Rows are `[data-category-id]` elements inside `#category-list`, each
//! carrying `data-label`, `data-icon` and `data-item-count`.

use std::cell::RefCell;
use std::rc::Rc;

use cv_ui_core::Notifier;
use cv_ui_core::categories::CategoryRow;
use cv_ui_core::emoji::{CATEGORY_EMOJIS, PickerState};
use cv_ui_core::reorder::{self, CategoryOrder, DragSession, DropPosition, ReorderSync, SaveOutcome};
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{DragEvent, Element, HtmlFormElement, HtmlInputElement, KeyboardEvent, MouseEvent};

use crate::AppContext;
use crate::dom;
use crate::events;

pub const CATEGORY_LIST_ID: &str = "category-list";
const ROW_SELECTOR: &str = "[data-category-id]";
const PICKER_SELECTOR: &str = ".emoji-picker";
const EDIT_MODAL_ID: &str = "edit-category-modal";
const EDIT_FORM_ID: &str = "edit-category-form";
const EDIT_LABEL_ID: &str = "edit-category-label";
const EDIT_PICKER: &str = "edit";
const DELETE_FORM_ID: &str = "delete-category-form";
pub const REORDER_FAILED_MESSAGE: &str = "Failed to save category order";

fn row_id(row: &Element) -> Option<i64> {
    row.get_attribute("data-category-id")?.parse().ok()
}

fn category_of(row: &Element) -> Option<CategoryRow> {
    let attr = |name: &str| row.get_attribute(name).unwrap_or_default();
    Some(CategoryRow {
        id: row_id(row)?,
        label: attr("data-label"),
        icon: attr("data-icon"),
        item_count: attr("data-item-count").parse().unwrap_or(0),
    })
}

fn current_order(list: &Element) -> CategoryOrder {
    CategoryOrder::new(
        dom::query_all_within(list, ROW_SELECTOR)
            .iter()
            .filter_map(row_id)
            .collect(),
    )
}

/// Re-append rows so the DOM matches `order`.
fn apply_order(list: &Element, order: &CategoryOrder) {
    for id in order.ids() {
        if let Some(row) = dom::query_within(list, &format!("[data-category-id=\"{id}\"]")) {
            let _ = list.append_child(&row);
        }
    }
}

fn clear_indicators(list: &Element) {
    for row in dom::query_all_within(list, ROW_SELECTOR) {
        dom::remove_class(&row, DropPosition::Before.css_class());
        dom::remove_class(&row, DropPosition::After.css_class());
    }
}

fn drop_position(event: &DragEvent, row: &Element) -> DropPosition {
    let rect = row.get_bounding_client_rect();
    DropPosition::classify(f64::from(event.client_y()), rect.top(), rect.height())
}

// ── Emoji pickers ──

fn picker_by_name(name: &str) -> Option<Element> {
    dom::query(&format!("{PICKER_SELECTOR}[data-picker=\"{name}\"]"))
}

/// Write `glyph` into a picker's hidden input and button label.
fn set_picker_value(picker: &Element, glyph: &str) {
    if let Some(input) = dom::query_within_typed::<HtmlInputElement>(picker, "input[type=\"hidden\"]") {
        input.set_value(glyph);
    }
    if let Some(button) = dom::query_within(picker, ".emoji-picker-btn") {
        dom::set_text(&button, glyph);
    }
}

fn fill_palette(picker: &Element) -> Result<(), JsValue> {
    let Some(popover) = dom::query_within(picker, ".emoji-picker-popover") else {
        return Ok(());
    };
    popover.set_inner_html("");
    for glyph in CATEGORY_EMOJIS {
        let option = dom::create_element("button")?;
        option.set_attribute("type", "button")?;
        option.set_attribute("data-emoji", glyph)?;
        option.set_class_name("emoji-option");
        dom::set_text(&option, glyph);
        popover.append_child(&option)?;
    }
    Ok(())
}

fn bind_pickers() -> Result<(), JsValue> {
    let state = Rc::new(RefCell::new(PickerState::default()));

    for picker in dom::query_all(PICKER_SELECTOR) {
        let Some(name) = picker.get_attribute("data-picker") else {
            continue;
        };
        fill_palette(&picker)?;

        let state = state.clone();
        let this = picker.clone();
        events::listen(&picker, "click", move |event: MouseEvent| {
            if let Some(option) = dom::closest(event.target(), ".emoji-option") {
                let glyph = option.get_attribute("data-emoji").unwrap_or_default();
                set_picker_value(&this, &glyph);
                state.borrow_mut().choose(&name);
                dom::remove_class(&this, "open");
            } else if dom::closest(event.target(), ".emoji-picker-btn").is_some() {
                event.prevent_default();
                let mut picks = state.borrow_mut();
                if let Some(previous) = picks.toggle(&name).and_then(|prev| picker_by_name(&prev)) {
                    dom::remove_class(&previous, "open");
                }
                dom::toggle_class(&this, "open", picks.open_picker() == Some(name.as_str()));
            }
        })?;
    }

    events::listen(&dom::document(), "click", move |event: MouseEvent| {
        if dom::closest(event.target(), PICKER_SELECTOR).is_some() {
            return;
        }
        if let Some(open) = state.borrow_mut().outside_click().and_then(|name| picker_by_name(&name)) {
            dom::remove_class(&open, "open");
        }
    })
}

// ── Edit modal ──

fn close_edit_modal() {
    if let Some(modal) = dom::by_id(EDIT_MODAL_ID) {
        dom::remove_class(&modal, "active");
        dom::lock_scroll(EDIT_MODAL_ID, false);
    }
}

fn open_edit_modal(category: &CategoryRow) {
    let (Some(modal), Some(form)) = (dom::by_id(EDIT_MODAL_ID), dom::by_id_typed::<HtmlFormElement>(EDIT_FORM_ID))
    else {
        warn!("edit modal markup missing");
        return;
    };
    form.set_action(&category.update_action());
    if let Some(label) = dom::by_id_typed::<HtmlInputElement>(EDIT_LABEL_ID) {
        label.set_value(&category.label);
    }
    if let Some(picker) = picker_by_name(EDIT_PICKER) {
        set_picker_value(&picker, &category.icon);
    }
    dom::add_class(&modal, "active");
    dom::lock_scroll(EDIT_MODAL_ID, true);
}

fn bind_edit_modal() -> Result<(), JsValue> {
    let Some(modal) = dom::by_id(EDIT_MODAL_ID) else {
        return Ok(());
    };

    let backdrop = modal.clone();
    events::listen(&modal, "click", move |event: MouseEvent| {
        let on_backdrop = event
            .target()
            .is_some_and(|target| AsRef::<JsValue>::as_ref(&target) == AsRef::<JsValue>::as_ref(&backdrop));
        if on_backdrop || dom::closest(event.target(), "[data-edit-cancel]").is_some() {
            close_edit_modal();
        }
    })?;

    events::listen(&dom::document(), "keydown", move |event: KeyboardEvent| {
        if event.key() == "Escape" && modal.class_list().contains("active") {
            close_edit_modal();
        }
    })
}

// ── Delete ──

fn submit_delete(category: &CategoryRow) -> Result<(), JsValue> {
    let form = dom::by_id_typed::<HtmlFormElement>(DELETE_FORM_ID)
        .ok_or_else(|| JsValue::from_str("delete form missing"))?;
    form.set_action(&category.delete_action());
    if let Some(force) = dom::query_within_typed::<HtmlInputElement>(&form, "input[name=\"force\"]") {
        force.set_value(if category.needs_force() { "1" } else { "0" });
    }
    form.submit()
}

async fn confirm_and_delete(ctx: AppContext, category: CategoryRow) {
    if !ctx.modal.show(category.delete_request()).confirmed().await {
        debug!("delete of category {} cancelled", category.id);
        return;
    }
    if let Err(err) = submit_delete(&category) {
        warn!("could not submit delete for category {}: {:?}", category.id, err);
        ctx.toasts.error("Failed to delete category");
    }
}

fn bind_row_actions(ctx: &AppContext, list: &Element) -> Result<(), JsValue> {
    let ctx = ctx.clone();
    events::listen(list, "click", move |event: MouseEvent| {
        let Some(category) = dom::closest(event.target(), ROW_SELECTOR).and_then(|row| category_of(&row)) else {
            return;
        };
        if dom::closest(event.target(), ".category-edit-btn").is_some() {
            open_edit_modal(&category);
        } else if dom::closest(event.target(), ".category-delete-btn").is_some() {
            event.prevent_default();
            wasm_bindgen_futures::spawn_local(confirm_and_delete(ctx.clone(), category));
        }
    })
}

// ── Drag and drop ──

fn bind_reorder(ctx: &AppContext, list: &Element) -> Result<(), JsValue> {
    let session = Rc::new(RefCell::new(DragSession::default()));
    let sync = Rc::new(RefCell::new(ReorderSync::new(current_order(list))));

    {
        let session = session.clone();
        events::listen(list, "dragstart", move |event: DragEvent| {
            let Some(row) = dom::closest(event.target(), ROW_SELECTOR) else {
                return;
            };
            let Some(id) = row_id(&row) else {
                return;
            };
            session.borrow_mut().start(id);
            dom::add_class(&row, "dragging");
            if let Some(transfer) = event.data_transfer() {
                transfer.set_effect_allowed("move");
                let _ = transfer.set_data("text/plain", &id.to_string());
            }
        })?;
    }

    {
        let session = session.clone();
        let list_el = list.clone();
        events::listen(list, "dragover", move |event: DragEvent| {
            let Some(row) = dom::closest(event.target(), ROW_SELECTOR) else {
                return;
            };
            let Some(id) = row_id(&row) else {
                return;
            };
            event.prevent_default();
            clear_indicators(&list_el);
            if let Some(position) = session.borrow_mut().hover(id, drop_position(&event, &row)) {
                dom::add_class(&row, position.css_class());
            }
        })?;
    }

    {
        let session = session.clone();
        events::listen(list, "dragleave", move |event: DragEvent| {
            let Some(row) = dom::closest(event.target(), ROW_SELECTOR) else {
                return;
            };
            if let Some(id) = row_id(&row) {
                session.borrow_mut().leave(id);
            }
            dom::remove_class(&row, DropPosition::Before.css_class());
            dom::remove_class(&row, DropPosition::After.css_class());
        })?;
    }

    {
        let session = session.clone();
        let list_el = list.clone();
        let ctx = ctx.clone();
        events::listen(list, "drop", move |event: DragEvent| {
            let Some(row) = dom::closest(event.target(), ROW_SELECTOR) else {
                return;
            };
            let Some(target) = row_id(&row) else {
                return;
            };
            event.prevent_default();
            clear_indicators(&list_el);

            let current = current_order(&list_el);
            let next = match session
                .borrow_mut()
                .drop_on(target, drop_position(&event, &row), &current)
            {
                Ok(Some(next)) => next,
                Ok(None) => return,
                Err(err) => {
                    warn!("drop ignored: {}", err);
                    return;
                }
            };
            apply_order(&list_el, &next);

            let ctx = ctx.clone();
            let sync = sync.clone();
            let list_el = list_el.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let SaveOutcome::RolledBack(order) = reorder::save_order(&*ctx.api, &sync, next).await {
                    apply_order(&list_el, &order);
                    ctx.toasts.error(REORDER_FAILED_MESSAGE);
                }
            });
        })?;
    }

    let list_el = list.clone();
    events::listen(list, "dragend", move |_: DragEvent| {
        session.borrow_mut().end();
        clear_indicators(&list_el);
        for row in dom::query_all_within(&list_el, ".dragging") {
            dom::remove_class(&row, "dragging");
        }
    })
}

pub fn bind(ctx: &AppContext) -> Result<(), JsValue> {
    let list = dom::by_id(CATEGORY_LIST_ID).ok_or_else(|| JsValue::from_str("category list missing"))?;

    bind_pickers()?;
    bind_edit_modal()?;
    bind_row_actions(ctx, &list)?;
    bind_reorder(ctx, &list)?;

    debug!("admin panel bound with {} categories", current_order(&list).ids().len());
    Ok(())
}
