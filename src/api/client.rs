//! `reqwest`-backed gateway client.
//!
//! DESIGN
//! ======
//! The bearer credential is process-wide mutable state shared by every
//! request from this client, like a default `Authorization` header. It is
//! read at request time so a login or logout takes effect for the next call.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::{PoisonError, RwLock};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::chat::{ChatCompletion, ChatCompletionRequest, ChatMessage, ChatOptions};
use super::types::{AuthPayload, LoginRequest, RegisterRequest, User, error_detail};
use super::{ApiError, AuthBackend};
use crate::config::{ClientConfig, Timeouts};

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    bearer: RwLock<Option<String>>,
}

impl ApiClient {
    /// Build a client for `base_url` (already normalized, no trailing `/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, timeouts: Timeouts) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.into(), bearer: RwLock::new(None) })
    }

    /// Build a client from parsed [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Self::new(config.api_base.clone(), config.timeouts)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Token currently attached to session-scoped requests.
    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.bearer.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// `POST /v1/chat/completions` with `options.api_key` as the bearer.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or an
    /// unparseable body.
    pub async fn chat_completions(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Result<ChatCompletion, ApiError> {
        let body = ChatCompletionRequest::new(messages, options);
        let request = self
            .http
            .post(self.url("/v1/chat/completions"))
            .bearer_auth(&options.api_key)
            .json(&body);
        tracing::debug!(model = body.model, messages = messages.len(), "chat completion request");
        Self::send(request).await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self.with_bearer(self.http.get(self.url(path)));
        Self::send(request).await
    }

    async fn post_json<T: DeserializeOwned>(&self, path: &str, body: &impl Serialize) -> Result<T, ApiError> {
        let request = self.with_bearer(self.http.post(self.url(path))).json(body);
        Self::send(request).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_bearer(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.bearer() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), detail: error_detail(&text) });
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl AuthBackend for ApiClient {
    fn set_bearer(&self, token: &str) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = Some(token.to_owned());
    }

    fn clear_bearer(&self) {
        *self.bearer.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    async fn login(&self, username: &str, password: &str) -> Result<AuthPayload, ApiError> {
        self.post_json("/auth/login", &LoginRequest { username, password })
            .await
    }

    async fn register(&self, username: &str, email: &str, password: &str) -> Result<AuthPayload, ApiError> {
        self.post_json("/auth/register", &RegisterRequest { username, email, password })
            .await
    }

    async fn me(&self) -> Result<User, ApiError> {
        self.get_json("/auth/me").await
    }
}
