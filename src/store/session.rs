//! Authentication state.

use crate::api::ApiClient;
use crate::domain::{Credentials, Result, SessionState};

#[derive(Debug, Default)]
pub struct SessionStore {
    state: SessionState,
    pending: bool,
    error: Option<String>,
    /// Bumped by every `begin` and `clear`; replies tagged with an older value are stale.
    attempt: u64,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.state.token()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    #[must_use]
    pub const fn pending(&self) -> bool {
        self.pending
    }

    /// Message of the last failed login or sign-up.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Marks a login or sign-up as in flight and returns its attempt number.
    pub fn begin(&mut self) -> u64 {
        self.attempt += 1;
        self.pending = true;
        self.error = None;
        self.attempt
    }

    /// Whether a reply for `attempt` still belongs to the in-flight request.
    ///
    /// False once the session was cleared or a newer attempt began.
    #[must_use]
    pub const fn is_current(&self, attempt: u64) -> bool {
        self.pending && self.attempt == attempt
    }

    /// Folds an authentication result in. Returns the new token on success.
    ///
    /// A failure leaves the session as it was and records the message.
    pub fn resolve(&mut self, result: std::result::Result<String, String>) -> Option<&str> {
        self.pending = false;
        match result {
            Ok(token) => {
                tracing::info!("session authenticated");
                self.state = SessionState::Authenticated(token);
                self.state.token()
            }
            Err(message) => {
                tracing::warn!(error = %message, "authentication rejected");
                self.error = Some(message);
                None
            }
        }
    }

    /// Adopts a previously persisted token.
    pub fn restore(&mut self, token: String) {
        tracing::debug!("session restored");
        self.state = SessionState::Authenticated(token);
    }

    /// Ends the session locally, whatever state it was in.
    pub fn clear(&mut self) {
        self.attempt += 1;
        self.state = SessionState::Anonymous;
        self.pending = false;
        self.error = None;
    }

    /// Logs in and attaches the returned token to `api`.
    ///
    /// # Errors
    ///
    /// Returns the transport error; the session state is left unchanged.
    pub async fn login(&mut self, api: &ApiClient, credentials: &Credentials) -> Result<()> {
        self.begin();
        let result = api.login(credentials).await;
        self.finish(api, result)
    }

    /// Creates an account, then behaves like [`login`](Self::login).
    ///
    /// # Errors
    ///
    /// Same as [`login`](Self::login).
    pub async fn signup(&mut self, api: &ApiClient, credentials: &Credentials) -> Result<()> {
        self.begin();
        let result = api.signup(credentials).await;
        self.finish(api, result)
    }

    /// Ends the session and detaches the token from `api`.
    pub fn logout(&mut self, api: &ApiClient) {
        self.clear();
        api.set_auth_token(None);
    }

    fn finish(&mut self, api: &ApiClient, result: Result<String>) -> Result<()> {
        match result {
            Ok(token) => {
                let token = self.resolve(Ok(token)).map(str::to_string);
                api.set_auth_token(token);
                Ok(())
            }
            Err(e) => {
                self.resolve(Err(e.to_string()));
                Err(e)
            }
        }
    }
}
