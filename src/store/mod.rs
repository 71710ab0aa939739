//! State containers for the catalog, the session and layout flags.
//!
//! Each store exposes pure transitions, used by the event handler when
//! requests run on the worker, and async wrappers that call the
//! [`ApiClient`](crate::api::ApiClient) directly.
//!
//! # Organization
//!
//! - [`status`]: Operation kinds, lifecycle states and tickets
//! - [`catalog`]: The movie collection
//! - [`session`]: Anonymous / authenticated state
//! - [`ui`]: Navigation panel flag

pub mod catalog;
pub mod session;
pub mod status;
pub mod ui;

pub use catalog::{Applied, CatalogOutcome, CatalogStore};
pub use session::SessionStore;
pub use status::{OpKind, OpState, Ticket};
pub use ui::UiStore;
