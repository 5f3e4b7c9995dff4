//! `fetch`-based implementation of the backend seam.
//!
//! Requests go to `{api_base}{path}` with the page's cookies; an empty base
//! keeps them same-origin.

use async_trait::async_trait;
use cv_api_types::{
    ActionResponse, CHANGE_EMAIL_PATH, CHANGE_PASSWORD_PATH, ChangeEmailRequest, ChangePasswordRequest,
    NOTIFICATION_SETTINGS_PATH, NotificationSettingsRequest, REORDER_CATEGORIES_PATH,
    ReorderCategoriesRequest, TEST_EMAIL_PATH,
};
use cv_ui_core::api::{check_reorder_response, decode_action_response};
use cv_ui_core::{ApiError, CanventoryApi};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use tracing::debug;

pub struct FetchApi {
    base: String,
}

impl FetchApi {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        Request::post(&self.url(path)).credentials(web_sys::RequestCredentials::SameOrigin)
    }

    async fn send<B: Serialize + ?Sized>(&self, path: &str, body: Option<&B>) -> Result<(u16, String), ApiError> {
        let response: Response = match body {
            Some(body) => self.post(path).json(body).map_err(transport)?.send().await,
            None => self.post(path).send().await,
        }
        .map_err(transport)?;

        let status = response.status();
        let text = response.text().await.map_err(transport)?;
        debug!("POST {} -> {}", path, status);
        Ok((status, text))
    }
}

fn transport(err: gloo_net::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

#[async_trait(?Send)]
impl CanventoryApi for FetchApi {
    async fn reorder_categories(&self, request: &ReorderCategoriesRequest) -> Result<(), ApiError> {
        let (status, text) = self.send(REORDER_CATEGORIES_PATH, Some(request)).await?;
        check_reorder_response(status, &text)
    }

    async fn update_notifications(&self, request: &NotificationSettingsRequest) -> Result<ActionResponse, ApiError> {
        let (status, text) = self.send(NOTIFICATION_SETTINGS_PATH, Some(request)).await?;
        decode_action_response(status, &text)
    }

    async fn send_test_email(&self) -> Result<ActionResponse, ApiError> {
        let (status, text) = self.send::<()>(TEST_EMAIL_PATH, None).await?;
        decode_action_response(status, &text)
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> Result<ActionResponse, ApiError> {
        let (status, text) = self.send(CHANGE_PASSWORD_PATH, Some(request)).await?;
        decode_action_response(status, &text)
    }

    async fn change_email(&self, request: &ChangeEmailRequest) -> Result<ActionResponse, ApiError> {
        let (status, text) = self.send(CHANGE_EMAIL_PATH, Some(request)).await?;
        decode_action_response(status, &text)
    }
}
