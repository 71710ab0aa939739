//! Token storage abstraction.

use crate::domain::error::Result;

/// Persistence for the session token.
///
/// Implementations must treat a missing record as "no session" rather than an
/// error.
///
/// # Examples
///
/// ```no_run
/// use cinedex::storage::{JsonTokenStore, TokenStore};
/// use std::path::PathBuf;
///
/// let mut store = JsonTokenStore::new(PathBuf::from("/tmp/cinedex/session.json"))?;
/// store.save(Some("t1"))?;
/// assert_eq!(store.load()?.as_deref(), Some("t1"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait TokenStore: Send {
    /// Returns the stored token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the record exists but cannot be read.
    fn load(&self) -> Result<Option<String>>;

    /// Stores `token`, or clears the record when `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn save(&mut self, token: Option<&str>) -> Result<()>;
}
