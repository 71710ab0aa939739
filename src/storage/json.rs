//! JSON file-based token storage.
//!
//! Writes go to a sibling temp file which is then renamed over the target, so a
//! crash never leaves a half-written session file behind.
//!
//! # File Format
//!
//! ```json
//! {
//!   "version": 1,
//!   "token": "eyJhbGciOi...",
//!   "saved_at": "2024-05-01T10:00:00Z"
//! }
//! ```

use crate::domain::error::{CinedexError, Result};
use crate::storage::backend::TokenStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const FORMAT_VERSION: u32 = 1;

/// Owner read/write only; the file holds a bearer token.
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionFile {
    version: u32,

    #[serde(default)]
    token: Option<String>,

    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
}

/// Session token stored in a JSON file.
pub struct JsonTokenStore {
    file_path: PathBuf,
}

impl JsonTokenStore {
    /// Opens a token store at `file_path`, creating parent directories.
    ///
    /// The file itself is only created on the first [`TokenStore::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing token storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self { file_path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn write_atomic(&self, data: &SessionFile) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        let mut file = create_private(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&tmp_path, &self.file_path)?;
        Ok(())
    }
}

/// Creates `path` afresh so the permission bits are applied even when a stale
/// temp file was left behind.
fn create_private(path: &Path) -> std::io::Result<File> {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options.open(path)
}

impl TokenStore for JsonTokenStore {
    fn load(&self) -> Result<Option<String>> {
        if !self.file_path.exists() {
            tracing::debug!("no session file");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        let data: SessionFile = serde_json::from_str(&contents)
            .map_err(|e| CinedexError::Storage(format!("failed to parse session file: {e}")))?;

        let token = data.token.filter(|token| !token.trim().is_empty());
        tracing::debug!(
            version = data.version,
            has_token = token.is_some(),
            "loaded session file"
        );
        Ok(token)
    }

    fn save(&mut self, token: Option<&str>) -> Result<()> {
        match token {
            Some(token) => {
                tracing::debug!(path = ?self.file_path, "saving session token");
                self.write_atomic(&SessionFile {
                    version: FORMAT_VERSION,
                    token: Some(token.to_string()),
                    saved_at: Some(Utc::now()),
                })
            }
            None => {
                tracing::debug!(path = ?self.file_path, "clearing session token");
                match std::fs::remove_file(&self.file_path) {
                    Ok(()) => Ok(()),
                    Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
                    Err(err) => Err(err.into()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonTokenStore {
        JsonTokenStore::new(dir.path().join("nested").join("session.json")).unwrap()
    }

    #[test]
    fn missing_file_means_no_session() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load().unwrap(), None);
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn saves_and_reloads_token() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.save(Some("t1")).unwrap();

        let reopened = store_in(&dir);
        assert_eq!(reopened.load().unwrap().as_deref(), Some("t1"));
        assert!(!store.path().with_extension("tmp").exists());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private_to_owner() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        std::fs::write(store.path().with_extension("tmp"), "leftover").unwrap();
        store.save(Some("secret-token")).unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "mode was {mode:o}");
        assert_eq!(store.load().unwrap().as_deref(), Some("secret-token"));
    }

    #[test]
    fn clearing_removes_the_file_and_is_repeatable() {
        let dir = TempDir::new().unwrap();
        let mut store = store_in(&dir);
        store.save(Some("t1")).unwrap();
        store.save(None).unwrap();
        store.save(None).unwrap();

        assert!(!store.path().exists());
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.load(), Err(CinedexError::Storage(_))));
    }
}
