//! Declarative confirm-before-submit for forms.
//!
//! A form opts in with `data-confirm="<policy>"`; `data-confirm-name` names
//! the subject and `data-confirm-message` carries text for the generic
//! policy. Attributes are read fresh on every submit.

use tracing::debug;

use crate::modal::{self, DialogKind, DialogOptions, DialogRequest, DialogSurface, ModalController};

pub const CONFIRM_ATTR: &str = "data-confirm";
pub const CONFIRM_NAME_ATTR: &str = "data-confirm-name";
pub const CONFIRM_MESSAGE_ATTR: &str = "data-confirm-message";

pub const DEFAULT_SUBJECT: &str = "this item";
pub const DEFAULT_GENERIC_MESSAGE: &str = "Are you sure you want to continue?";
pub const USER_DELETE_MESSAGE: &str = "This will permanently delete the user account and all of their \
     data, including homes and pantry items they own. This action cannot be undone.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfirmPolicy {
    Delete,
    UserDelete,
    Generic,
}

impl ConfirmPolicy {
    /// Unrecognised values fall back to the generic prompt.
    pub fn from_attr(value: &str) -> Self {
        match value.trim() {
            "delete" => ConfirmPolicy::Delete,
            "user-delete" => ConfirmPolicy::UserDelete,
            _ => ConfirmPolicy::Generic,
        }
    }
}

/// A submittable form as the binder sees it.
pub trait ConfirmableForm {
    fn attribute(&self, name: &str) -> Option<String>;
    /// Submit without passing through the interceptor again.
    fn submit(&self);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmationBinding {
    pub policy: ConfirmPolicy,
    pub subject: String,
    pub message: Option<String>,
}

impl ConfirmationBinding {
    /// `None` for forms that did not opt in.
    pub fn from_form<F: ConfirmableForm + ?Sized>(form: &F) -> Option<Self> {
        let policy = ConfirmPolicy::from_attr(&form.attribute(CONFIRM_ATTR)?);
        let subject = form
            .attribute(CONFIRM_NAME_ATTR)
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_SUBJECT.to_owned());
        let message = form
            .attribute(CONFIRM_MESSAGE_ATTR)
            .filter(|message| !message.trim().is_empty());

        Some(Self {
            policy,
            subject,
            message,
        })
    }

    pub fn request(&self) -> DialogRequest {
        match self.policy {
            ConfirmPolicy::Delete => modal::confirm_delete(self.subject.clone(), DialogOptions::default()),
            ConfirmPolicy::UserDelete => modal::confirm_delete(
                self.subject.clone(),
                DialogOptions::default()
                    .title("Delete User")
                    .message(USER_DELETE_MESSAGE)
                    .confirm_text("Delete User"),
            ),
            ConfirmPolicy::Generic => modal::confirm(
                self.message
                    .clone()
                    .unwrap_or_else(|| DEFAULT_GENERIC_MESSAGE.to_owned()),
                DialogOptions::default()
                    .title("Please Confirm")
                    .kind(DialogKind::Warning),
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitDecision {
    /// Form carries no policy; the caller lets the submit proceed.
    Unbound,
    Submitted,
    Declined,
}

/// Ask first, then submit. Declining touches nothing on the form.
pub async fn confirm_submission<S, F>(modal: &ModalController<S>, form: &F) -> SubmitDecision
where
    S: DialogSurface,
    F: ConfirmableForm + ?Sized,
{
    let Some(binding) = ConfirmationBinding::from_form(form) else {
        return SubmitDecision::Unbound;
    };

    if modal.show(binding.request()).confirmed().await {
        form.submit();
        SubmitDecision::Submitted
    } else {
        debug!("submission of '{}' declined", binding.subject);
        SubmitDecision::Declined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modal::tests::RecordingSurface;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeForm {
        attrs: HashMap<String, String>,
        fields: RefCell<HashMap<String, String>>,
        submitted: Cell<u32>,
    }

    impl FakeForm {
        fn with_attr(mut self, name: &str, value: &str) -> Self {
            self.attrs.insert(name.to_owned(), value.to_owned());
            self
        }
    }

    impl ConfirmableForm for FakeForm {
        fn attribute(&self, name: &str) -> Option<String> {
            self.attrs.get(name).cloned()
        }

        fn submit(&self) {
            self.submitted.set(self.submitted.get() + 1);
        }
    }

    #[tokio::test]
    async fn affirm_submits_once() {
        let surface = RecordingSurface::default();
        let modal = ModalController::new(Some(&surface));
        let form = FakeForm::default()
            .with_attr(CONFIRM_ATTR, "delete")
            .with_attr(CONFIRM_NAME_ATTR, "Canned Beans");

        let (decision, ()) = tokio::join!(confirm_submission(&modal, &form), async {
            tokio::task::yield_now().await;
            assert_eq!(form.submitted.get(), 0);
            modal.activate(1).unwrap();
        });

        assert_eq!(decision, SubmitDecision::Submitted);
        assert_eq!(form.submitted.get(), 1);
        assert_eq!(surface.last_shown().visible_subtitle(), Some("Canned Beans"));
    }

    #[tokio::test]
    async fn decline_leaves_form_alone() {
        let surface = RecordingSurface::default();
        let modal = ModalController::new(Some(&surface));
        let form = FakeForm::default().with_attr(CONFIRM_ATTR, "delete");
        form.fields
            .borrow_mut()
            .insert("quantity".to_owned(), "3".to_owned());

        let (decision, ()) = tokio::join!(confirm_submission(&modal, &form), async {
            tokio::task::yield_now().await;
            assert!(modal.handle_key("Escape"));
        });

        assert_eq!(decision, SubmitDecision::Declined);
        assert_eq!(form.submitted.get(), 0);
        assert_eq!(form.fields.borrow().get("quantity").map(String::as_str), Some("3"));
    }

    #[tokio::test]
    async fn unmarked_form_is_untouched() {
        let surface = RecordingSurface::default();
        let modal = ModalController::new(Some(&surface));
        let form = FakeForm::default();

        assert_eq!(confirm_submission(&modal, &form).await, SubmitDecision::Unbound);
        assert!(surface.shown.borrow().is_empty());
        assert_eq!(form.submitted.get(), 0);
    }

    #[test]
    fn default_subject_and_policy_variants() {
        let form = FakeForm::default().with_attr(CONFIRM_ATTR, "delete");
        let binding = ConfirmationBinding::from_form(&form).unwrap();
        assert_eq!(binding.subject, DEFAULT_SUBJECT);
        assert_eq!(binding.request().visible_subtitle(), Some(DEFAULT_SUBJECT));

        let form = FakeForm::default()
            .with_attr(CONFIRM_ATTR, "user-delete")
            .with_attr(CONFIRM_NAME_ATTR, "alice@example.com");
        let request = ConfirmationBinding::from_form(&form).unwrap().request();
        assert_eq!(request.title, "Delete User");
        assert_eq!(request.message, USER_DELETE_MESSAGE);
        assert_eq!(request.kind, DialogKind::Danger);
    }

    #[test]
    fn unknown_policy_uses_generic_message() {
        let form = FakeForm::default()
            .with_attr(CONFIRM_ATTR, "archive-everything")
            .with_attr(CONFIRM_MESSAGE_ATTR, "Mark all items as consumed?");
        let binding = ConfirmationBinding::from_form(&form).unwrap();
        assert_eq!(binding.policy, ConfirmPolicy::Generic);

        let request = binding.request();
        assert_eq!(request.kind, DialogKind::Warning);
        assert_eq!(request.message, "Mark all items as consumed?");

        let form = FakeForm::default().with_attr(CONFIRM_ATTR, "");
        let request = ConfirmationBinding::from_form(&form).unwrap().request();
        assert_eq!(request.message, DEFAULT_GENERIC_MESSAGE);
    }
}
