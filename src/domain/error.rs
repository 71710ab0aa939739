//! Error types for the cinedex client.
//!
//! This module defines the centralized error type [`CinedexError`] and a type alias
//! [`Result`] used throughout the crate. Errors fall into three user-facing groups:
//!
//! - **Validation**: client-side, field-scoped, never reaches the network
//! - **Transport**: network or HTTP failure, recorded as a store error message
//! - **Not found**: a movie id missing from the loaded catalog while populating
//!   the edit form
//!
//! The remaining variants cover local concerns (configuration, token storage, I/O).
//! None of them are fatal; every failure can be retried by the user.

use crate::domain::MovieId;
use crate::form::ValidationErrors;
use crate::store::OpKind;
use thiserror::Error;

/// The main error type for cinedex operations.
#[derive(Debug, Error)]
pub enum CinedexError {
    /// The request could not be completed or the server answered with a non-2xx status.
    ///
    /// `status` is `None` when the failure happened before a response arrived
    /// (connection refused, DNS, malformed body).
    #[error("{message}")]
    Transport {
        /// HTTP status code, when a response was received.
        status: Option<u16>,
        /// Human-readable cause, shown verbatim as the store error.
        message: String,
    },

    /// The movie form is incomplete. Submission was blocked before any request.
    #[error("Please fill out all required fields ({} missing)", .0.len())]
    Validation(ValidationErrors),

    /// A movie id is absent from the loaded catalog.
    #[error("Movie not found: {0}")]
    NotFound(MovieId),

    /// An operation of the same kind is already in flight.
    #[error("A {0} operation is already in progress")]
    Busy(OpKind),

    /// Reading or writing the persisted session failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The API worker is gone or stopped accepting requests.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CinedexError {
    /// Builds a transport error for a response with a non-success status.
    ///
    /// The message mirrors what users of the web client saw
    /// (`Request failed with status code 500`), followed by the server's own
    /// `message` field when the body carried one.
    #[must_use]
    pub fn from_status(status: u16, server_message: Option<&str>) -> Self {
        let message = match server_message {
            Some(detail) if !detail.trim().is_empty() => {
                format!("Request failed with status code {status}: {}", detail.trim())
            }
            _ => format!("Request failed with status code {status}"),
        };
        Self::Transport {
            status: Some(status),
            message,
        }
    }

    /// Returns `true` for network and HTTP failures.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl From<reqwest::Error> for CinedexError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// A specialized `Result` type for cinedex operations.
pub type Result<T> = std::result::Result<T, CinedexError>;
