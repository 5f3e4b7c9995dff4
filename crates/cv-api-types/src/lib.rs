use serde::{Deserialize, Serialize};

pub const REORDER_CATEGORIES_PATH: &str = "/web/admin/categories/reorder";
pub const NOTIFICATION_SETTINGS_PATH: &str = "/web/settings/notifications";
pub const TEST_EMAIL_PATH: &str = "/web/settings/test-email";
pub const CHANGE_PASSWORD_PATH: &str = "/web/settings/change-password";
pub const CHANGE_EMAIL_PATH: &str = "/web/settings/change-email";

/// Form action that updates a category's label and icon.
pub fn category_update_path(category_id: i64) -> String {
    format!("/web/admin/categories/{category_id}/update")
}

/// Form action that deletes a category; `force=1` reassigns its items first.
pub fn category_delete_path(category_id: i64) -> String {
    format!("/web/admin/categories/{category_id}/delete")
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryOrderEntry {
    pub id: i64,
    pub sort_order: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReorderCategoriesRequest {
    pub categories: Vec<CategoryOrderEntry>,
}

/// Error body of the reorder route, `{error: "..."}`. Success is signalled
/// by the status alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReorderCategoriesResponse {
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSettingsRequest {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeEmailRequest {
    pub new_email: String,
    pub password: String,
}

/// Shared response shape of the settings routes.
///
/// Declared failures come back with a non-2xx status *and* this body, so
/// callers decode it regardless of status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub new_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reorder_request_matches_backend_shape() {
        let request = ReorderCategoriesRequest {
            categories: vec![
                CategoryOrderEntry { id: 3, sort_order: 0 },
                CategoryOrderEntry { id: 1, sort_order: 1 },
            ],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"categories": [{"id": 3, "sort_order": 0}, {"id": 1, "sort_order": 1}]})
        );
    }

    #[test]
    fn action_response_tolerates_missing_fields() {
        let resp: ActionResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.message.is_none());
        assert!(resp.new_email.is_none());

        let resp: ActionResponse =
            serde_json::from_str(r#"{"success": true, "message": "Email changed successfully", "new_email": "a@b.c"}"#)
                .unwrap();
        assert!(resp.success);
        assert_eq!(resp.new_email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn reorder_error_body_decodes() {
        let resp: ReorderCategoriesResponse = serde_json::from_str(r#"{"error": "Unauthorized"}"#).unwrap();
        assert_eq!(resp.error.as_deref(), Some("Unauthorized"));
    }

    #[test]
    fn category_form_paths() {
        assert_eq!(category_update_path(7), "/web/admin/categories/7/update");
        assert_eq!(category_delete_path(7), "/web/admin/categories/7/delete");
    }
}
