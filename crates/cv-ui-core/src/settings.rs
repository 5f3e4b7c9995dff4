//! Settings page actions.
//!
//! Each action validates locally, calls the backend once and surfaces the
//! outcome as a toast. Nothing is retried.

use cv_api_types::{ActionResponse, ChangeEmailRequest, ChangePasswordRequest, NotificationSettingsRequest};
use tracing::warn;

use crate::api::CanventoryApi;
use crate::error::{ApiError, UiError};
use crate::toast::Notifier;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

#[derive(Clone, Debug, Default)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<ChangePasswordRequest, UiError> {
        if self.current_password.is_empty() || self.new_password.is_empty() || self.confirm_password.is_empty() {
            return Err(UiError::validation("All password fields are required"));
        }
        if self.new_password != self.confirm_password {
            return Err(UiError::validation("New passwords do not match"));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(UiError::validation(format!(
                "New password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        Ok(ChangePasswordRequest {
            current_password: self.current_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct EmailChange {
    pub new_email: String,
    pub password: String,
}

impl EmailChange {
    pub fn validate(&self) -> Result<ChangeEmailRequest, UiError> {
        let email = self.new_email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(UiError::validation("Email and password are required"));
        }
        let valid_shape = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !valid_shape {
            return Err(UiError::validation("Please enter a valid email address"));
        }
        Ok(ChangeEmailRequest {
            new_email: email.to_owned(),
            password: self.password.clone(),
        })
    }
}

pub struct SettingsActions<'a, A: ?Sized, N: ?Sized> {
    api: &'a A,
    notifier: &'a N,
}

impl<'a, A, N> SettingsActions<'a, A, N>
where
    A: CanventoryApi + ?Sized,
    N: Notifier + ?Sized,
{
    pub fn new(api: &'a A, notifier: &'a N) -> Self {
        Self { api, notifier }
    }

    /// Returns whether the backend accepted the change; the caller reverts
    /// the toggle otherwise.
    pub async fn set_notifications(&self, enabled: bool) -> bool {
        let result = self
            .api
            .update_notifications(&NotificationSettingsRequest { enabled })
            .await;
        let fallback = if enabled {
            "Email notifications enabled"
        } else {
            "Email notifications disabled"
        };
        self.surface(result, fallback, "Failed to update notification settings")
            .is_some()
    }

    pub async fn send_test_email(&self) -> bool {
        let result = self.api.send_test_email().await;
        self.surface(result, "Test email sent successfully", "Failed to send test email")
            .is_some()
    }

    /// Returns whether the form should be cleared.
    pub async fn change_password(&self, form: &PasswordChange) -> bool {
        let request = match form.validate() {
            Ok(request) => request,
            Err(err) => {
                self.notifier.error(&err.to_string());
                return false;
            }
        };
        let result = self.api.change_password(&request).await;
        self.surface(result, "Password changed successfully", "Failed to change password")
            .is_some()
    }

    /// Returns the address now on the account.
    pub async fn change_email(&self, form: &EmailChange) -> Option<String> {
        let request = match form.validate() {
            Ok(request) => request,
            Err(err) => {
                self.notifier.error(&err.to_string());
                return None;
            }
        };
        let requested = request.new_email.clone();
        let result = self.api.change_email(&request).await;
        self.surface(result, "Email changed successfully", "Failed to change email")
            .map(|response| response.new_email.unwrap_or(requested))
    }

    fn surface(
        &self,
        result: Result<ActionResponse, ApiError>,
        success_fallback: &str,
        failure_fallback: &str,
    ) -> Option<ActionResponse> {
        match result {
            Ok(response) if response.success => {
                self.notifier
                    .success(response.message.as_deref().unwrap_or(success_fallback));
                Some(response)
            }
            Ok(response) => {
                self.notifier
                    .error(response.message.as_deref().unwrap_or(failure_fallback));
                None
            }
            Err(err) => {
                warn!("settings request failed: {}", err);
                self.notifier.error(NETWORK_ERROR_MESSAGE);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toast::ToastKind;
    use crate::toast::tests::RecordingNotifier;
    use async_trait::async_trait;
    use cv_api_types::ReorderCategoriesRequest;
    use std::cell::{Cell, RefCell};

    struct ScriptedApi {
        reply: Result<ActionResponse, ApiError>,
        calls: Cell<u32>,
        last_password: RefCell<Option<ChangePasswordRequest>>,
    }

    impl ScriptedApi {
        fn replying(reply: Result<ActionResponse, ApiError>) -> Self {
            Self {
                reply,
                calls: Cell::new(0),
                last_password: RefCell::new(None),
            }
        }

        fn answer(&self) -> Result<ActionResponse, ApiError> {
            self.calls.set(self.calls.get() + 1);
            self.reply.clone()
        }
    }

    #[async_trait(?Send)]
    impl CanventoryApi for ScriptedApi {
        async fn reorder_categories(&self, _: &ReorderCategoriesRequest) -> Result<(), ApiError> {
            unreachable!()
        }

        async fn update_notifications(&self, _: &NotificationSettingsRequest) -> Result<ActionResponse, ApiError> {
            self.answer()
        }

        async fn send_test_email(&self) -> Result<ActionResponse, ApiError> {
            self.answer()
        }

        async fn change_password(&self, request: &ChangePasswordRequest) -> Result<ActionResponse, ApiError> {
            *self.last_password.borrow_mut() = Some(request.clone());
            self.answer()
        }

        async fn change_email(&self, _: &ChangeEmailRequest) -> Result<ActionResponse, ApiError> {
            self.answer()
        }
    }

    fn ok(message: Option<&str>) -> Result<ActionResponse, ApiError> {
        Ok(ActionResponse {
            success: true,
            message: message.map(str::to_owned),
            ..Default::default()
        })
    }

    fn declined(message: Option<&str>) -> Result<ActionResponse, ApiError> {
        Ok(ActionResponse {
            success: false,
            message: message.map(str::to_owned),
            ..Default::default()
        })
    }

    fn password(current: &str, new: &str, confirm: &str) -> PasswordChange {
        PasswordChange {
            current_password: current.to_owned(),
            new_password: new.to_owned(),
            confirm_password: confirm.to_owned(),
        }
    }

    #[tokio::test]
    async fn mismatched_passwords_never_reach_backend() {
        let api = ScriptedApi::replying(ok(None));
        let notifier = RecordingNotifier::default();
        let actions = SettingsActions::new(&api, &notifier);

        assert!(!actions.change_password(&password("old", "longenough1", "longenough2")).await);
        assert_eq!(api.calls.get(), 0);
        let toast = notifier.last().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "New passwords do not match");
    }

    #[tokio::test]
    async fn short_password_rejected_locally() {
        let api = ScriptedApi::replying(ok(None));
        let notifier = RecordingNotifier::default();
        let actions = SettingsActions::new(&api, &notifier);

        assert!(!actions.change_password(&password("old", "short", "short")).await);
        assert_eq!(api.calls.get(), 0);
        assert_eq!(
            notifier.last().unwrap().message,
            "New password must be at least 8 characters"
        );
    }

    #[tokio::test]
    async fn valid_password_change_is_sent() {
        let api = ScriptedApi::replying(ok(Some("Password changed successfully")));
        let notifier = RecordingNotifier::default();
        let actions = SettingsActions::new(&api, &notifier);

        assert!(actions.change_password(&password("old", "brand-new-pw", "brand-new-pw")).await);
        let sent = api.last_password.borrow().clone().unwrap();
        assert_eq!(sent.current_password, "old");
        assert_eq!(sent.new_password, "brand-new-pw");
        assert_eq!(notifier.last().unwrap().kind, ToastKind::Success);
    }

    #[tokio::test]
    async fn declared_failure_shows_server_message_or_fallback() {
        let api = ScriptedApi::replying(declined(Some("Current password is incorrect")));
        let notifier = RecordingNotifier::default();
        let actions = SettingsActions::new(&api, &notifier);
        assert!(!actions.change_password(&password("bad", "brand-new-pw", "brand-new-pw")).await);
        assert_eq!(notifier.last().unwrap().message, "Current password is incorrect");

        let api = ScriptedApi::replying(declined(None));
        let actions = SettingsActions::new(&api, &notifier);
        assert!(!actions.send_test_email().await);
        assert_eq!(notifier.last().unwrap().message, "Failed to send test email");
    }

    #[tokio::test]
    async fn transport_failure_uses_fixed_message() {
        let api = ScriptedApi::replying(Err(ApiError::Transport("offline".to_owned())));
        let notifier = RecordingNotifier::default();
        let actions = SettingsActions::new(&api, &notifier);

        assert!(!actions.set_notifications(true).await);
        let toast = notifier.last().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, NETWORK_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn notifications_fallback_message_names_state() {
        let api = ScriptedApi::replying(ok(None));
        let notifier = RecordingNotifier::default();
        let actions = SettingsActions::new(&api, &notifier);

        assert!(actions.set_notifications(false).await);
        assert_eq!(notifier.last().unwrap().message, "Email notifications disabled");
    }

    #[tokio::test]
    async fn email_change_returns_new_address() {
        let api = ScriptedApi::replying(Ok(ActionResponse {
            success: true,
            message: Some("Email changed successfully".to_owned()),
            new_email: Some("cook@example.com".to_owned()),
            ..Default::default()
        }));
        let notifier = RecordingNotifier::default();
        let actions = SettingsActions::new(&api, &notifier);

        let form = EmailChange {
            new_email: " Cook@example.com ".to_owned(),
            password: "secret".to_owned(),
        };
        assert_eq!(actions.change_email(&form).await.as_deref(), Some("cook@example.com"));
    }

    #[test]
    fn email_shape_validation() {
        let form = |email: &str| EmailChange {
            new_email: email.to_owned(),
            password: "pw".to_owned(),
        };
        assert!(form("a@b").validate().is_ok());
        assert!(form("@b").validate().is_err());
        assert!(form("a@").validate().is_err());
        assert!(form("plain").validate().is_err());
        assert_eq!(
            EmailChange::default().validate().unwrap_err(),
            UiError::validation("Email and password are required")
        );
    }
}
