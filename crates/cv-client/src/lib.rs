//! Native HTTP client for the Canventory web routes.
//!
//! Used by scripts and integration tests that need to drive the same JSON
//! endpoints the browser front end calls.

use anyhow::{Context, Result};
use async_trait::async_trait;
use cv_api_types::{
    ActionResponse, CHANGE_EMAIL_PATH, CHANGE_PASSWORD_PATH, ChangeEmailRequest, ChangePasswordRequest,
    NOTIFICATION_SETTINGS_PATH, NotificationSettingsRequest, REORDER_CATEGORIES_PATH,
    ReorderCategoriesRequest, TEST_EMAIL_PATH,
};
use cv_ui_core::api::{check_reorder_response, decode_action_response};
use cv_ui_core::{ApiError, CanventoryApi};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// HTTP adapter for a Canventory server.
///
/// Reads `CANVENTORY_URL` from environment at construction time
/// (default: `http://localhost:8000`).
pub struct CanventoryHttpApi {
    base_url: String,
    session_cookie: Option<String>,
    http: reqwest::Client,
}

impl Default for CanventoryHttpApi {
    fn default() -> Self {
        Self::new(None)
    }
}

impl CanventoryHttpApi {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url
            .or_else(|| std::env::var("CANVENTORY_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie: None,
            http: reqwest::Client::new(),
        }
    }

    /// Send `cookie` with every request; the web routes are session-authenticated.
    pub fn with_session_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.session_cookie = Some(cookie.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> Result<(u16, String)> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.post(&url);
        if let Some(cookie) = &self.session_cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("POST {path} transport"))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .with_context(|| format!("POST {path} body"))?;
        debug!("POST {} -> {}", path, status);
        Ok((status, text))
    }

    async fn action<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> Result<ActionResponse, ApiError> {
        let (status, text) = self.post(path, body).await.map_err(transport)?;
        decode_action_response(status, &text)
    }
}

fn transport(err: anyhow::Error) -> ApiError {
    ApiError::Transport(format!("{err:#}"))
}

#[async_trait(?Send)]
impl CanventoryApi for CanventoryHttpApi {
    async fn reorder_categories(&self, request: &ReorderCategoriesRequest) -> Result<(), ApiError> {
        let (status, text) = self
            .post(REORDER_CATEGORIES_PATH, Some(request))
            .await
            .map_err(transport)?;
        check_reorder_response(status, &text)
    }

    async fn update_notifications(&self, request: &NotificationSettingsRequest) -> Result<ActionResponse, ApiError> {
        self.action(NOTIFICATION_SETTINGS_PATH, Some(request)).await
    }

    async fn send_test_email(&self) -> Result<ActionResponse, ApiError> {
        self.action::<()>(TEST_EMAIL_PATH, None).await
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<ActionResponse, ApiError> {
        self.action(CHANGE_PASSWORD_PATH, Some(request)).await
    }

    async fn change_email(&self, request: &ChangeEmailRequest) -> Result<ActionResponse, ApiError> {
        self.action(CHANGE_EMAIL_PATH, Some(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use cv_api_types::CategoryOrderEntry;
    use serde_json::{Value, json};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Recorded {
        bodies: Arc<Mutex<Vec<Value>>>,
        cookies: Arc<Mutex<Vec<String>>>,
    }

    async fn reorder(State(recorded): State<Recorded>, headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if let Some(cookie) = headers.get("cookie").and_then(|value| value.to_str().ok()) {
            recorded.cookies.lock().unwrap().push(cookie.to_owned());
        }
        let empty = body["categories"].as_array().is_none_or(|rows| rows.is_empty());
        recorded.bodies.lock().unwrap().push(body);
        if empty {
            (StatusCode::BAD_REQUEST, Json(json!({"error": "No categories provided"})))
        } else {
            (StatusCode::OK, Json(json!({"success": true})))
        }
    }

    async fn change_password(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["current_password"] == "correct-horse" {
            (StatusCode::OK, Json(json!({"success": true, "message": "Password changed successfully"})))
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"success": false, "message": "Current password is incorrect"})),
            )
        }
    }

    async fn test_email() -> (StatusCode, &'static str) {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom")
    }

    async fn spawn_stub() -> (String, Recorded) {
        let recorded = Recorded::default();
        let app = Router::new()
            .route(REORDER_CATEGORIES_PATH, post(reorder))
            .route(CHANGE_PASSWORD_PATH, post(change_password))
            .route(TEST_EMAIL_PATH, post(test_email))
            .with_state(recorded.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/"), recorded)
    }

    #[test]
    fn explicit_url_wins_and_is_trimmed() {
        let api = CanventoryHttpApi::new(Some("http://pantry.local:9000/".to_owned()));
        assert_eq!(api.base_url(), "http://pantry.local:9000");
    }

    #[tokio::test]
    async fn reorder_posts_batch_and_cookie() {
        let (url, recorded) = spawn_stub().await;
        let api = CanventoryHttpApi::new(Some(url)).with_session_cookie("session=abc");

        let request = ReorderCategoriesRequest {
            categories: vec![
                CategoryOrderEntry { id: 3, sort_order: 0 },
                CategoryOrderEntry { id: 1, sort_order: 1 },
            ],
        };
        api.reorder_categories(&request).await.unwrap();

        let bodies = recorded.bodies.lock().unwrap();
        assert_eq!(bodies[0], json!({"categories": [{"id": 3, "sort_order": 0}, {"id": 1, "sort_order": 1}]}));
        assert_eq!(recorded.cookies.lock().unwrap().as_slice(), ["session=abc"]);
    }

    #[tokio::test]
    async fn reorder_rejection_carries_server_error() {
        let (url, _) = spawn_stub().await;
        let api = CanventoryHttpApi::new(Some(url));

        let err = api
            .reorder_categories(&ReorderCategoriesRequest { categories: Vec::new() })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                body: "No categories provided".to_owned()
            }
        );
    }

    #[tokio::test]
    async fn declared_failure_is_decoded() {
        let (url, _) = spawn_stub().await;
        let api = CanventoryHttpApi::new(Some(url));

        let wrong = ChangePasswordRequest {
            current_password: "nope".to_owned(),
            new_password: "brand-new-pw".to_owned(),
        };
        let response = api.change_password(&wrong).await.unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("Current password is incorrect"));

        let right = ChangePasswordRequest {
            current_password: "correct-horse".to_owned(),
            ..wrong
        };
        assert!(api.change_password(&right).await.unwrap().success);
    }

    #[tokio::test]
    async fn undecodable_error_is_status() {
        let (url, _) = spawn_stub().await;
        let api = CanventoryHttpApi::new(Some(url));

        let err = api.send_test_email().await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                body: "boom".to_owned()
            }
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = CanventoryHttpApi::new(Some(format!("http://{addr}")));
        let err = api.send_test_email().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
