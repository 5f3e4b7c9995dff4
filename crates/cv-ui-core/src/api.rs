//! Backend seam.
//!
//! The browser build implements `CanventoryApi` over `fetch`, the native
//! client over `reqwest`. Both share the response interpretation below.

use async_trait::async_trait;
use cv_api_types::{
    ActionResponse, ChangeEmailRequest, ChangePasswordRequest, NotificationSettingsRequest,
    ReorderCategoriesRequest, ReorderCategoriesResponse,
};

use crate::error::ApiError;

#[async_trait(?Send)]
pub trait CanventoryApi {
    async fn reorder_categories(&self, request: &ReorderCategoriesRequest) -> Result<(), ApiError>;
    async fn update_notifications(
        &self,
        request: &NotificationSettingsRequest,
    ) -> Result<ActionResponse, ApiError>;
    async fn send_test_email(&self) -> Result<ActionResponse, ApiError>;
    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<ActionResponse, ApiError>;
    async fn change_email(&self, request: &ChangeEmailRequest) -> Result<ActionResponse, ApiError>;
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Interpret a settings-route response.
///
/// A non-2xx status with a decodable body is a declared failure and is
/// returned as `Ok` with `success == false`.
pub fn decode_action_response(status: u16, body: &str) -> Result<ActionResponse, ApiError> {
    match serde_json::from_str::<ActionResponse>(body) {
        Ok(mut response) => {
            if !is_success(status) {
                response.success = false;
            }
            Ok(response)
        }
        Err(err) if is_success(status) => Err(ApiError::Decode(err.to_string())),
        Err(_) => Err(ApiError::Status {
            status,
            body: body.to_owned(),
        }),
    }
}

/// Interpret a reorder response. Only the HTTP status is contractual; an
/// `error` field is used for the message when present.
pub fn check_reorder_response(status: u16, body: &str) -> Result<(), ApiError> {
    if is_success(status) {
        return Ok(());
    }

    let message = serde_json::from_str::<ReorderCategoriesResponse>(body)
        .ok()
        .and_then(|response| response.error)
        .unwrap_or_else(|| body.to_owned());

    Err(ApiError::Status {
        status,
        body: message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declared_failure_is_not_a_transport_error() {
        let response = decode_action_response(
            400,
            r#"{"success": false, "message": "Current password is incorrect"}"#,
        )
        .unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Current password is incorrect"));
    }

    #[test]
    fn non_json_error_page_is_status_error() {
        let err = decode_action_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 502,
                body: "<html>Bad Gateway</html>".to_owned()
            }
        );
    }

    #[test]
    fn garbage_on_success_is_decode_error() {
        let err = decode_action_response(200, "not json").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn reorder_uses_error_field() {
        assert!(check_reorder_response(200, r#"{"success": true}"#).is_ok());
        assert!(check_reorder_response(204, "").is_ok());

        let err = check_reorder_response(403, r#"{"error": "Unauthorized"}"#).unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 403,
                body: "Unauthorized".to_owned()
            }
        );
    }
}
