//! REST client for the movie catalog backend.
//!
//! # Organization
//!
//! - [`client`]: Shared HTTP client, bearer token and error mapping
//! - [`movies`]: `/movies` endpoints and multipart encoding
//! - [`auth`]: `/auth/login` and `/auth/sign-up`

pub mod auth;
pub mod client;
pub mod movies;

pub use client::{ApiClient, RequestBody, DEFAULT_BASE_URL};
pub use movies::multipart_form;
