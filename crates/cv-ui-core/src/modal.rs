//! Shared modal dialog controller.
//!
//! One overlay per page, at most one outstanding dialog. `show` hands back a
//! `DialogHandle` that completes exactly once: with the activated button's
//! value, with `Dismissed` (overlay click, Escape, inert controller) or with
//! `Superseded` when a later `show` replaces it.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::UiError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DialogKind {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl DialogKind {
    pub fn default_icon(self) -> &'static str {
        match self {
            DialogKind::Info => "\u{1f4ac}",
            DialogKind::Success => "\u{2705}",
            DialogKind::Warning => "\u{26a0}\u{fe0f}",
            DialogKind::Danger => "\u{1f5d1}\u{fe0f}",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            DialogKind::Info => "modal-info",
            DialogKind::Success => "modal-success",
            DialogKind::Warning => "modal-warning",
            DialogKind::Danger => "modal-danger",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
    Danger,
}

impl ButtonStyle {
    pub fn css_class(self) -> &'static str {
        match self {
            ButtonStyle::Primary => "btn-primary",
            ButtonStyle::Secondary => "btn-secondary",
            ButtonStyle::Danger => "btn-danger",
        }
    }

    /// Primary and danger buttons are the ones that take initial focus.
    pub fn takes_focus(self) -> bool {
        matches!(self, ButtonStyle::Primary | ButtonStyle::Danger)
    }
}

/// One dialog button. Every prompt is a yes/no decision, so a button's
/// result is a `bool`; dismissal reads as `false`, the same as the decline
/// button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonSpec {
    pub label: String,
    pub style: ButtonStyle,
    pub value: bool,
}

impl ButtonSpec {
    pub fn new(label: impl Into<String>, style: ButtonStyle, value: bool) -> Self {
        Self {
            label: label.into(),
            style,
            value,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DialogRequest {
    pub kind: DialogKind,
    pub icon: Option<String>,
    pub title: String,
    pub subtitle: String,
    pub message: String,
    pub buttons: Vec<ButtonSpec>,
}

impl DialogRequest {
    pub fn icon(&self) -> &str {
        match self.icon.as_deref() {
            Some(icon) if !icon.is_empty() => icon,
            _ => self.kind.default_icon(),
        }
    }

    /// `None` means the subtitle region is hidden.
    pub fn visible_subtitle(&self) -> Option<&str> {
        if self.subtitle.is_empty() { None } else { Some(&self.subtitle) }
    }

    pub fn focus_index(&self) -> Option<usize> {
        self.buttons.iter().position(|button| button.style.takes_focus())
    }
}

/// Overrides for the convenience constructors. Unset fields keep the
/// constructor's defaults.
#[derive(Clone, Debug, Default)]
pub struct DialogOptions {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub icon: Option<String>,
    pub kind: Option<DialogKind>,
    pub confirm_text: Option<String>,
    pub confirm_style: Option<ButtonStyle>,
    pub message: Option<String>,
}

impl DialogOptions {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn kind(mut self, kind: DialogKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn confirm_text(mut self, text: impl Into<String>) -> Self {
        self.confirm_text = Some(text.into());
        self
    }

    pub fn confirm_style(mut self, style: ButtonStyle) -> Self {
        self.confirm_style = Some(style);
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

pub const DEFAULT_DELETE_MESSAGE: &str =
    "Are you sure you want to delete this item? This action cannot be undone.";

/// Single "OK" button; kind defaults to info.
pub fn alert(message: impl Into<String>, opts: DialogOptions) -> DialogRequest {
    DialogRequest {
        kind: opts.kind.unwrap_or(DialogKind::Info),
        icon: opts.icon,
        title: opts.title.unwrap_or_else(|| "Notice".to_owned()),
        subtitle: opts.subtitle.unwrap_or_default(),
        message: message.into(),
        buttons: vec![ButtonSpec::new(
            opts.confirm_text.unwrap_or_else(|| "OK".to_owned()),
            ButtonStyle::Primary,
            true,
        )],
    }
}

/// "Cancel" (false) plus an overridable confirm button (true); kind
/// defaults to warning.
pub fn confirm(message: impl Into<String>, opts: DialogOptions) -> DialogRequest {
    DialogRequest {
        kind: opts.kind.unwrap_or(DialogKind::Warning),
        icon: opts.icon,
        title: opts.title.unwrap_or_else(|| "Confirm Action".to_owned()),
        subtitle: opts.subtitle.unwrap_or_default(),
        message: message.into(),
        buttons: vec![
            ButtonSpec::new("Cancel", ButtonStyle::Secondary, false),
            ButtonSpec::new(
                opts.confirm_text.unwrap_or_else(|| "Confirm".to_owned()),
                opts.confirm_style.unwrap_or(ButtonStyle::Primary),
                true,
            ),
        ],
    }
}

/// Destructive prompt naming the item in the subtitle.
pub fn confirm_delete(item_name: impl Into<String>, opts: DialogOptions) -> DialogRequest {
    DialogRequest {
        kind: DialogKind::Danger,
        icon: Some(DialogKind::Danger.default_icon().to_owned()),
        title: opts.title.unwrap_or_else(|| "Delete Item".to_owned()),
        subtitle: item_name.into(),
        message: opts
            .message
            .unwrap_or_else(|| DEFAULT_DELETE_MESSAGE.to_owned()),
        buttons: vec![
            ButtonSpec::new("Cancel", ButtonStyle::Secondary, false),
            ButtonSpec::new(
                opts.confirm_text.unwrap_or_else(|| "Delete".to_owned()),
                ButtonStyle::Danger,
                true,
            ),
        ],
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DialogOutcome {
    Chosen(bool),
    Dismissed,
    Superseded,
}

impl DialogOutcome {
    /// Boolean result as callers branch on it; every non-choice is `false`.
    pub fn value(self) -> bool {
        match self {
            DialogOutcome::Chosen(value) => value,
            DialogOutcome::Dismissed | DialogOutcome::Superseded => false,
        }
    }
}

/// Pending result of one `show` call.
#[derive(Debug)]
pub struct DialogHandle {
    rx: oneshot::Receiver<DialogOutcome>,
}

impl DialogHandle {
    fn resolved(outcome: DialogOutcome) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(outcome);
        Self { rx }
    }

    pub async fn confirmed(self) -> bool {
        self.await.value()
    }
}

impl Future for DialogHandle {
    type Output = DialogOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // A dropped controller counts as dismissal.
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or(DialogOutcome::Dismissed))
    }
}

/// The rendering side of the controller.
pub trait DialogSurface {
    /// Populate and reveal the dialog; lock page scroll.
    fn render(&self, request: &DialogRequest);
    /// Hide the dialog; restore page scroll.
    fn hide(&self);
    /// Move focus to a button once rendering has settled.
    fn focus_button(&self, index: usize);
}

struct ActiveDialog {
    request: DialogRequest,
    responder: oneshot::Sender<DialogOutcome>,
}

pub struct ModalController<S> {
    surface: Option<S>,
    active: RefCell<Option<ActiveDialog>>,
}

impl<S: DialogSurface> ModalController<S> {
    /// Bind to a surface. `None` (overlay missing from the page) yields an
    /// inert controller whose dialogs resolve as dismissed.
    pub fn new(surface: Option<S>) -> Self {
        if surface.is_none() {
            warn!("modal overlay not found; dialogs disabled on this page");
        }
        Self {
            surface,
            active: RefCell::new(None),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.surface.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.active.borrow().is_some()
    }

    pub fn current(&self) -> Option<DialogRequest> {
        self.active.borrow().as_ref().map(|active| active.request.clone())
    }

    pub fn show(&self, request: DialogRequest) -> DialogHandle {
        let Some(surface) = &self.surface else {
            debug!("inert modal dismissed '{}'", request.title);
            return DialogHandle::resolved(DialogOutcome::Dismissed);
        };

        let previous = self.active.borrow_mut().take();
        if let Some(previous) = previous {
            debug!("dialog '{}' superseded by '{}'", previous.request.title, request.title);
            let _ = previous.responder.send(DialogOutcome::Superseded);
        }

        surface.render(&request);
        if let Some(index) = request.focus_index() {
            surface.focus_button(index);
        }

        let (tx, rx) = oneshot::channel();
        *self.active.borrow_mut() = Some(ActiveDialog {
            request,
            responder: tx,
        });
        DialogHandle { rx }
    }

    pub fn alert(&self, message: impl Into<String>, opts: DialogOptions) -> DialogHandle {
        self.show(alert(message, opts))
    }

    pub fn confirm(&self, message: impl Into<String>, opts: DialogOptions) -> DialogHandle {
        self.show(confirm(message, opts))
    }

    pub fn confirm_delete(&self, item_name: impl Into<String>, opts: DialogOptions) -> DialogHandle {
        self.show(confirm_delete(item_name, opts))
    }

    /// User activated the button at `index`.
    pub fn activate(&self, index: usize) -> Result<(), UiError> {
        let value = {
            let active = self.active.borrow();
            let active = active.as_ref().ok_or(UiError::NoPendingDialog)?;
            active
                .request
                .buttons
                .get(index)
                .ok_or(UiError::UnknownButton(index))?
                .value
        };
        self.close(DialogOutcome::Chosen(value))
    }

    pub fn dismiss(&self) -> Result<(), UiError> {
        self.close(DialogOutcome::Dismissed)
    }

    /// Escape dismisses an open dialog. Returns whether the key was consumed.
    pub fn handle_key(&self, key: &str) -> bool {
        key == "Escape" && self.dismiss().is_ok()
    }

    /// Click that landed on the overlay itself, outside the dialog content.
    pub fn overlay_clicked(&self) -> bool {
        self.dismiss().is_ok()
    }

    /// Hide the dialog and resolve the pending handle. Rejected when nothing
    /// is pending, so a result can never be delivered twice.
    pub fn close(&self, outcome: DialogOutcome) -> Result<(), UiError> {
        let active = self.active.borrow_mut().take().ok_or(UiError::NoPendingDialog)?;
        if let Some(surface) = &self.surface {
            surface.hide();
        }
        let _ = active.responder.send(outcome);
        Ok(())
    }
}

/// Page scroll lock shared by every overlay. Each overlay locks under its
/// own name, and scroll comes back only once all of them have released.
#[derive(Debug, Default)]
pub struct ScrollLock {
    holders: RefCell<BTreeSet<&'static str>>,
}

impl ScrollLock {
    pub fn is_locked(&self) -> bool {
        !self.holders.borrow().is_empty()
    }

    /// Returns `true` when this call engaged the lock.
    pub fn acquire(&self, holder: &'static str) -> bool {
        let mut holders = self.holders.borrow_mut();
        let was_unlocked = holders.is_empty();
        holders.insert(holder);
        was_unlocked
    }

    /// Returns `true` when this call released the last hold.
    pub fn release(&self, holder: &'static str) -> bool {
        let mut holders = self.holders.borrow_mut();
        holders.remove(holder) && holders.is_empty()
    }
}
