//! Background worker for API requests.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol with trace context propagation
//! - `handler`: Worker task, request execution and response mapping

pub mod handler;
pub mod messages;

pub use handler::{ApiWorker, WorkerHandle};
pub use messages::{ApiRequest, ApiResponse, TraceContext};
