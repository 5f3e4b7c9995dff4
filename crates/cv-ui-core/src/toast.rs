//! Transient notifications.

use std::time::Duration;

pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
            ToastKind::Warning => "toast-warning",
            ToastKind::Info => "toast-info",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "\u{2713}",
            ToastKind::Error => "\u{2715}",
            ToastKind::Warning => "\u{26a0}",
            ToastKind::Info => "\u{2139}",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub duration: Duration,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            duration: DEFAULT_TOAST_DURATION,
        }
    }
}

/// Fire-and-forget message display.
pub trait Notifier {
    fn notify(&self, toast: Toast);

    fn success(&self, message: &str) {
        self.notify(Toast::new(ToastKind::Success, message));
    }

    fn error(&self, message: &str) {
        self.notify(Toast::new(ToastKind::Error, message));
    }

    fn warning(&self, message: &str) {
        self.notify(Toast::new(ToastKind::Warning, message));
    }

    fn info(&self, message: &str) {
        self.notify(Toast::new(ToastKind::Info, message));
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Notifier that keeps every toast for inspection.
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub(crate) toasts: RefCell<Vec<Toast>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, toast: Toast) {
            self.toasts.borrow_mut().push(toast);
        }
    }

    impl RecordingNotifier {
        pub(crate) fn last(&self) -> Option<Toast> {
            self.toasts.borrow().last().cloned()
        }
    }

    #[test]
    fn helpers_pick_kind_and_default_duration() {
        let notifier = RecordingNotifier::default();
        notifier.error("boom");
        notifier.success("ok");

        let toasts = notifier.toasts.borrow();
        assert_eq!(toasts[0].kind, ToastKind::Error);
        assert_eq!(toasts[0].message, "boom");
        assert_eq!(toasts[0].duration, DEFAULT_TOAST_DURATION);
        assert_eq!(toasts[1].kind, ToastKind::Success);
    }

    #[test]
    fn kind_styling() {
        assert_eq!(ToastKind::Info.css_class(), "toast-info");
        assert_eq!(ToastKind::Error.icon(), "\u{2715}");
    }
}
