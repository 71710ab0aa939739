//! Tokio worker that performs API requests off the event loop.
//!
//! The runtime posts [`ApiRequest`]s over an unbounded channel. Each request
//! runs in its own task, so a slow upload never holds up a fetch, and its
//! [`ApiResponse`] is sent back on a second channel to be folded into state
//! by the event handler.

use crate::api::ApiClient;
use crate::domain::{CinedexError, Result};
use crate::store::{CatalogOutcome, Ticket};
use crate::worker::{ApiRequest, ApiResponse};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Sending half used by the runtime to post requests.
#[derive(Debug, Clone)]
pub struct WorkerHandle {
    requests: UnboundedSender<ApiRequest>,
}

impl WorkerHandle {
    /// Posts a request to the worker.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Worker`] when the worker has stopped.
    pub fn post(&self, request: ApiRequest) -> Result<()> {
        self.requests
            .send(request)
            .map_err(|e| CinedexError::Worker(format!("worker stopped, dropped {}", e.0.name())))
    }
}

/// Executes API requests with a shared [`ApiClient`].
#[derive(Debug, Clone)]
pub struct ApiWorker {
    api: ApiClient,
    responses: UnboundedSender<ApiResponse>,
}

impl ApiWorker {
    #[must_use]
    pub fn new(api: ApiClient, responses: UnboundedSender<ApiResponse>) -> Self {
        Self { api, responses }
    }

    /// Starts a worker on the current tokio runtime.
    ///
    /// Returns the request handle, the response receiver and the worker task.
    /// The task ends once every [`WorkerHandle`] is dropped.
    #[must_use]
    pub fn spawn(api: ApiClient) -> (WorkerHandle, UnboundedReceiver<ApiResponse>, JoinHandle<()>) {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (response_tx, response_rx) = mpsc::unbounded_channel();
        let worker = Self::new(api, response_tx);
        let task = tokio::spawn(worker.run(request_rx));
        (WorkerHandle { requests: request_tx }, response_rx, task)
    }

    /// Receives requests until the channel closes, one task per request.
    pub async fn run(self, mut requests: UnboundedReceiver<ApiRequest>) {
        tracing::debug!(base_url = %self.api.base_url(), "api worker started");
        while let Some(request) = requests.recv().await {
            let span = Self::request_span(&request);
            let api = self.api.clone();
            let responses = self.responses.clone();
            tokio::spawn(
                async move {
                    let response = Self::handle_request(&api, request).await;
                    if responses.send(response).is_err() {
                        tracing::debug!("response receiver dropped");
                    }
                }
                .instrument(span),
            );
        }
        tracing::debug!("api worker stopped");
    }

    fn request_span(request: &ApiRequest) -> tracing::Span {
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::debug_span!("worker_handle_request", request = request.name());
        if let Some(parent) = request.trace_context().and_then(|tc| tc.to_otel_context()) {
            span.set_parent(parent);
        }
        span
    }

    fn catalog_result<T, F>(ticket: Ticket, result: Result<T>, on_success: F) -> ApiResponse
    where
        F: FnOnce(T) -> CatalogOutcome,
    {
        let outcome = match result {
            Ok(value) => {
                tracing::debug!(kind = %ticket.kind, "api request successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(kind = %ticket.kind, error = %e, "api request failed");
                CatalogOutcome::Failed(e.to_string())
            }
        };
        ApiResponse::Catalog { ticket, outcome }
    }

    fn auth_result(attempt: u64, result: Result<String>) -> ApiResponse {
        match result {
            Ok(token) => ApiResponse::Authenticated { attempt, token },
            Err(e) => ApiResponse::AuthFailed {
                attempt,
                message: e.to_string(),
            },
        }
    }

    /// Performs a single request and converts its result into a response.
    pub async fn handle_request(api: &ApiClient, request: ApiRequest) -> ApiResponse {
        match request {
            ApiRequest::FetchMovies { ticket, .. } => {
                Self::catalog_result(ticket, api.list_movies().await, CatalogOutcome::Fetched)
            }
            ApiRequest::CreateMovie {
                ticket, submission, ..
            } => Self::catalog_result(
                ticket,
                api.create_movie(&submission).await,
                CatalogOutcome::Created,
            ),
            ApiRequest::UpdateMovie {
                ticket,
                id,
                submission,
                ..
            } => Self::catalog_result(
                ticket,
                api.update_movie(&id, &submission).await,
                CatalogOutcome::Updated,
            ),
            ApiRequest::DeleteMovie { ticket, id, .. } => {
                let result = api.delete_movie(&id).await;
                Self::catalog_result(ticket, result, |()| CatalogOutcome::Deleted(id))
            }
            ApiRequest::Login {
                attempt,
                credentials,
                ..
            } => Self::auth_result(attempt, api.login(&credentials).await),
            ApiRequest::Signup {
                attempt,
                credentials,
                ..
            } => Self::auth_result(attempt, api.signup(&credentials).await),
        }
    }
}
