//! HTTP client for the movie catalog backend.
//!
//! [`ApiClient`] is cheap to clone; clones share the connection pool and the
//! attached bearer token, so a token set after login is visible to every
//! worker task holding a clone.

use crate::domain::{CinedexError, Result};
use reqwest::multipart::Form;
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::{Arc, PoisonError, RwLock};

/// Base address used when no override is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api/v1";

/// Payload of an outgoing request.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

#[derive(Debug)]
struct Inner {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

/// Shared REST client.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

impl ApiClient {
    /// Creates a client for `base_url`. Trailing slashes are dropped.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Creates a client reusing an existing [`reqwest::Client`].
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            inner: Arc::new(Inner {
                http,
                base_url,
                token: RwLock::new(None),
            }),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Attaches or removes the bearer token sent with every later request.
    pub fn set_auth_token(&self, token: Option<String>) {
        let mut slot = self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        tracing::debug!(attached = token.is_some(), "auth token updated");
        *slot = token;
    }

    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sends a request with the attached token and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Transport`] on network failure, non-2xx status
    /// or an undecodable body.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<T> {
        let token = self.auth_token();
        self.request_with(method, path, body, token.as_deref()).await
    }

    /// Sends a request with an explicit token (or none) and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Same as [`request`](Self::request).
    pub async fn request_with<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        auth_token: Option<&str>,
    ) -> Result<T> {
        let response = self.send(method, path, body, auth_token).await?;
        Ok(response.json::<T>().await?)
    }

    /// Sends a request with the attached token, discarding the response body.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Transport`] on network failure or non-2xx status.
    pub async fn execute(&self, method: Method, path: &str, body: RequestBody) -> Result<()> {
        let token = self.auth_token();
        self.send(method, path, body, token.as_deref()).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self, body, auth_token), fields(authorized = auth_token.is_some()))]
    async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
        auth_token: Option<&str>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'));
        let mut builder = self.inner.http.request(method, url);
        if let Some(token) = auth_token {
            builder = builder.bearer_auth(token);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::debug!(error = %e, "request failed before a response arrived");
            CinedexError::from(e)
        })?;
        Self::ensure_success(response).await
    }

    /// Maps a non-2xx response to a transport error carrying the server's
    /// `message` field when the body has one.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|value| {
                value
                    .get("message")
                    .or_else(|| value.get("error"))
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string)
            });
        tracing::debug!(status = status.as_u16(), detail = ?detail, "request rejected");
        Err(CinedexError::from_status(status.as_u16(), detail.as_deref()))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
