//! Cinedex: a terminal client for a movie catalog served over a REST API.
//!
//! Cinedex lets anyone browse the catalog and lets signed-in users add, edit and
//! delete movies:
//! - Bearer-token sessions (login, signup, logout) persisted between runs
//! - A catalog store that mirrors the backend and tracks each operation's status
//! - A movie form with live per-field validation and multipart poster upload
//! - Fuzzy search over movie names
//! - API calls run on a background worker so input never blocks

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Terminal shell (main.rs)                           │  ← stdin commands
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Routes and guards                                │
//! │  - Event handling → actions                         │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Stores        │   │ Worker        │   │ UI Layer      │
//! │ (store/)      │   │ (worker/)     │   │ (ui/)         │
//! │ - Session     │   │ - Requests    │   │ - Renderer    │
//! │ - Catalog     │   │ - Responses   │   │ - Components  │
//! │ - Ui          │   │ - Trace ctx   │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  API client (api/) · Form (form/) · Domain (domain/)│
//! │  Storage (storage/) · Paths (infrastructure/)       │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`api`]: HTTP client and endpoint wrappers
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Movie, person and session types; errors
//! - [`form`]: Movie form model and validation
//! - [`infrastructure`]: Data directory resolution
//! - [`storage`]: Persisted session token
//! - [`store`]: Session, catalog and UI stores
//! - [`worker`]: Background API worker
//! - [`ui`]: Plain-text rendering of view models
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! Defaults, then `config.toml`, then the environment:
//!
//! ```toml
//! # ~/.config/cinedex/config.toml
//! api_url = "https://movies.example.com/api/v1"
//! trace_level = "debug"
//! data_dir = "~/.cinedex"
//! persist_session = true
//! ```
//!
//! | key               | environment                | default                          |
//! |-------------------|----------------------------|----------------------------------|
//! | `api_url`         | `CINEDEX_API_URL`          | `http://localhost:3000/api/v1`   |
//! | `trace_level`     | `CINEDEX_TRACE_LEVEL`      | `info`                           |
//! | `data_dir`        | `CINEDEX_DATA_DIR`         | `$XDG_DATA_HOME/cinedex`         |
//! | `persist_session` | `CINEDEX_PERSIST_SESSION`  | `true`                           |
//!
//! # Examples
//!
//! ```no_run
//! use cinedex::{handle_event, initialize, Config, Event, Route};
//!
//! let (mut state, _api) = initialize(&Config::default());
//! let (should_render, actions) = handle_event(&mut state, &Event::Navigate(Route::Dashboard))?;
//! assert!(should_render);
//! // Anonymous users are sent to the login screen; nothing to dispatch.
//! assert!(actions.is_empty());
//! # Ok::<(), cinedex::CinedexError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod form;
pub mod infrastructure;
pub mod observability;
pub mod storage;
pub mod store;
pub mod ui;
pub mod worker;

pub use api::ApiClient;
pub use app::{handle_event, Action, AppState, Event, FormEvent, Route};
pub use domain::{CinedexError, Movie, MovieId, Result};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.toml";

/// Environment variables and the configuration keys they set.
const ENV_KEYS: [(&str, &str); 4] = [
    ("CINEDEX_API_URL", "api_url"),
    ("CINEDEX_TRACE_LEVEL", "trace_level"),
    ("CINEDEX_DATA_DIR", "data_dir"),
    ("CINEDEX_PERSIST_SESSION", "persist_session"),
];

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the REST API, without a trailing slash.
    pub api_base_url: String,

    /// Tracing filter directive. Options: `trace`, `debug`, `info`, `warn`,
    /// `error`, or any `EnvFilter` expression. Default: `"info"`
    pub trace_level: Option<String>,

    /// Directory for the session file and trace output. See
    /// [`infrastructure::paths`] for the fallback chain.
    pub data_dir: Option<String>,

    /// Keep the token on disk between runs. Default: `true`
    pub persist_session: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: api::DEFAULT_BASE_URL.to_string(),
            trace_level: None,
            data_dir: None,
            persist_session: true,
        }
    }
}

impl Config {
    /// Parses configuration from a flat key/value map, falling back to defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `api_url`: trailing slashes trimmed; blank keeps the default
    /// - `trace_level`, `data_dir`: blank means unset
    /// - `persist_session`: `true/yes/on/1` or `false/no/off/0`; anything else keeps the default
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use cinedex::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_url".to_string(), "http://films.local/api/v1/".to_string());
    /// map.insert("persist_session".to_string(), "no".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.api_base_url, "http://films.local/api/v1");
    /// assert!(!config.persist_session);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().overlay(map)
    }

    /// Applies the keys present in `map` on top of `self`.
    #[must_use]
    pub fn overlay(mut self, map: &BTreeMap<String, String>) -> Self {
        let value = |key: &str| {
            map.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(url) = value("api_url") {
            let trimmed = url.trim_end_matches('/');
            if !trimmed.is_empty() {
                self.api_base_url = trimmed.to_string();
            }
        }
        if let Some(level) = value("trace_level") {
            self.trace_level = Some(level);
        }
        if let Some(dir) = value("data_dir") {
            self.data_dir = Some(dir);
        }
        if let Some(persist) = value("persist_session").and_then(|v| parse_flag(&v)) {
            self.persist_session = persist;
        }
        self
    }

    /// Parses a TOML document. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`CinedexError::Config`] if the document is not valid TOML.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let table: toml::Table = contents
            .parse()
            .map_err(|e: toml::de::Error| CinedexError::Config(e.message().to_string()))?;

        let map: BTreeMap<String, String> = table
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();

        Ok(Self::from_map(&map))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&contents)
    }

    /// Applies `CINEDEX_*` variables obtained through `lookup`.
    #[must_use]
    pub fn with_env<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let map: BTreeMap<String, String> = ENV_KEYS
            .iter()
            .filter_map(|(var, key)| lookup(var).map(|value| ((*key).to_string(), value)))
            .collect();
        self.overlay(&map)
    }

    /// Resolves the full configuration: defaults, then the TOML file, then the
    /// process environment.
    ///
    /// `explicit` must exist when given. Otherwise the default location
    /// (`$XDG_CONFIG_HOME/cinedex/config.toml` or `~/.config/cinedex/config.toml`)
    /// is read only if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let file = explicit
            .map(Path::to_path_buf)
            .or_else(|| default_config_path().filter(|path| path.exists()));

        let base = match file {
            Some(path) => {
                tracing::debug!(path = ?path, "loading config file");
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        Ok(base.with_env(|key| std::env::var(key).ok()))
    }

    /// Resolved data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        infrastructure::get_data_dir(self.data_dir.as_deref())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

fn default_config_path() -> Option<PathBuf> {
    let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
    env("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("cinedex").join(CONFIG_FILE))
}

/// Sets up tracing and builds the initial state and API client.
///
/// The session starts anonymous; restoring a persisted token is up to the
/// caller (feed [`Event::SessionRestored`]).
pub fn initialize(config: &Config) -> (AppState, ApiClient) {
    observability::init_tracing(config);
    tracing::debug!(api = %config.api_base_url, "initializing cinedex");

    (AppState::new(), ApiClient::new(config.api_base_url.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn toml_values_override_defaults() {
        let config = Config::from_toml_str(
            r#"
            api_url = "https://movies.example.com/api/v1//"
            trace_level = "debug"
            persist_session = false
            unknown = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.api_base_url, "https://movies.example.com/api/v1");
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.data_dir, None);
        assert!(!config.persist_session);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(matches!(
            Config::from_toml_str("api_url = "),
            Err(CinedexError::Config(_))
        ));
    }

    #[test]
    fn environment_wins_over_file() {
        let env: HashMap<&str, &str> = [
            ("CINEDEX_API_URL", "http://env/api"),
            ("CINEDEX_PERSIST_SESSION", "maybe"),
            ("CINEDEX_DATA_DIR", "/tmp/cine"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_toml_str("api_url = \"http://file/api\"\npersist_session = false")
            .unwrap()
            .with_env(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.api_base_url, "http://env/api");
        assert!(!config.persist_session);
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/cine"));
    }

    #[test]
    fn blank_values_fall_back() {
        let mut map = BTreeMap::new();
        map.insert("api_url".to_string(), "  ".to_string());
        map.insert("trace_level".to_string(), String::new());

        assert_eq!(Config::from_map(&map), Config::default());
    }
}
