//! Domain layer: records exchanged with the backend and the crate error type.
//!
//! Nothing in here performs I/O. The types are shared by the API client, the
//! stores and the view layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie, person and identifier types with their wire encoding
//! - [`session`]: Credentials and session state

pub mod error;
pub mod movie;
pub mod session;

pub use error::{CinedexError, Result};
pub use movie::{Gender, Movie, MovieId, MovieList, Person};
pub use session::{Credentials, SessionState, TokenResponse};
