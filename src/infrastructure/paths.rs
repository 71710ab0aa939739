//! Path resolution for the data directory.
//!
//! The data directory holds `session.json` (the persisted token) and
//! `cinedex-otlp.json` (exported spans). It is chosen, first match wins, from:
//!
//! 1. an explicit directory from the configuration
//! 2. `$XDG_DATA_HOME/cinedex`
//! 3. `$HOME/.local/share/cinedex`
//! 4. `./.cinedex` when no home directory is known

use std::path::{Path, PathBuf};

const APP_DIR: &str = "cinedex";
const SESSION_FILE: &str = "session.json";
const TRACE_FILE: &str = "cinedex-otlp.json";

/// Returns the data directory, reading the process environment.
///
/// # Examples
///
/// ```
/// use cinedex::infrastructure::get_data_dir;
///
/// let dir = get_data_dir(Some("/var/lib/cinedex"));
/// assert_eq!(dir.to_str(), Some("/var/lib/cinedex"));
/// ```
#[must_use]
pub fn get_data_dir(configured: Option<&str>) -> PathBuf {
    resolve_data_dir(configured, |key| std::env::var(key).ok())
}

/// Resolves the data directory with an injectable environment lookup.
#[must_use]
pub fn resolve_data_dir<F>(configured: Option<&str>, env: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    if let Some(dir) = configured.filter(|dir| !dir.trim().is_empty()) {
        let home = non_empty(env("HOME"));
        return PathBuf::from(expand_tilde(dir.trim(), home.as_deref()));
    }

    if let Some(xdg) = non_empty(env("XDG_DATA_HOME")) {
        return PathBuf::from(xdg).join(APP_DIR);
    }

    match non_empty(env("HOME")) {
        Some(home) => PathBuf::from(home).join(".local").join("share").join(APP_DIR),
        None => PathBuf::from(".").join(format!(".{APP_DIR}")),
    }
}

/// Expands a leading `~` to `home`. Paths are returned unchanged without a home.
///
/// # Examples
///
/// ```
/// use cinedex::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/movies", Some("/home/ann")), "/home/ann/movies");
/// assert_eq!(expand_tilde("~", Some("/home/ann")), "/home/ann");
/// assert_eq!(expand_tilde("/absolute/path", Some("/home/ann")), "/absolute/path");
/// ```
#[must_use]
pub fn expand_tilde(path: &str, home: Option<&str>) -> String {
    match home {
        Some(home) if path == "~" => home.to_string(),
        Some(home) if path.starts_with("~/") => path.replacen('~', home, 1),
        _ => path.to_string(),
    }
}

#[must_use]
pub fn session_file(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_FILE)
}

#[must_use]
pub fn trace_file(data_dir: &Path) -> PathBuf {
    data_dir.join(TRACE_FILE)
}
