//! Storage layer for the persisted session token.
//!
//! The web client kept its bearer token in browser storage; the terminal client
//! keeps it in a small JSON file under the data directory so a restart does not
//! force a new login.
//!
//! # Modules
//!
//! - `backend`: the [`TokenStore`] trait
//! - `json`: JSON file implementation with atomic writes

pub mod backend;
pub mod json;

pub use backend::TokenStore;
pub use json::JsonTokenStore;
