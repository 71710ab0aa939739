//! Authentication endpoints.
//!
//! Both endpoints trade credentials for a bearer token. They are called
//! without an `Authorization` header; the token they return is attached by
//! the session store.

use super::client::{ApiClient, RequestBody};
use crate::domain::{Credentials, Result, TokenResponse};
use reqwest::Method;
use std::time::Instant;

impl ApiClient {
    /// `POST /auth/login`.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the credentials are refused or the
    /// request fails.
    #[tracing::instrument(level = "debug", skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        self.exchange_credentials("/auth/login", credentials).await
    }

    /// `POST /auth/sign-up`.
    ///
    /// # Errors
    ///
    /// Same as [`login`](Self::login).
    #[tracing::instrument(level = "debug", skip(self, credentials), fields(username = %credentials.username))]
    pub async fn signup(&self, credentials: &Credentials) -> Result<String> {
        self.exchange_credentials("/auth/sign-up", credentials).await
    }

    async fn exchange_credentials(&self, path: &str, credentials: &Credentials) -> Result<String> {
        let start = Instant::now();
        let body = RequestBody::Json(serde_json::to_value(credentials)?);
        let result = self
            .request_with::<TokenResponse>(Method::POST, path, body, None)
            .await;
        let duration_ms = start.elapsed().as_millis();
        match result {
            Ok(response) => {
                tracing::info!(duration_ms, "authenticated");
                Ok(response.token)
            }
            Err(e) => {
                tracing::warn!(error = %e, duration_ms, "authentication failed");
                Err(e)
            }
        }
    }
}
