//! Side effects requested by the event handler.
//!
//! The handler never performs I/O itself. It mutates [`AppState`](super::AppState)
//! and returns a list of [`Action`]s; the runtime executes them in order.

use crate::domain::MovieId;
use crate::worker::ApiRequest;
use std::fmt;

/// Commands executed by the runtime after an event was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Posts a request to the API worker.
    Dispatch(ApiRequest),

    /// Asks the user a yes/no question; a yes is fed back as
    /// [`Confirmation::confirmed_event`].
    Confirm(Confirmation),

    /// Attaches (or detaches, with `None`) the bearer token on the API client.
    SetCredential(Option<String>),

    /// Saves (or clears, with `None`) the token in the session file.
    PersistSession(Option<String>),

    /// Shows a one-off message to the user.
    Notify(Notice),
}

/// Questions that need an explicit yes before the handler proceeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    DeleteMovie(MovieId),
}

impl Confirmation {
    #[must_use]
    pub const fn prompt(&self) -> &'static str {
        match self {
            Self::DeleteMovie(_) => "Are you sure you want to delete this movie?",
        }
    }

    /// Event to handle once the user agreed.
    #[must_use]
    pub fn confirmed_event(self) -> super::Event {
        match self {
            Self::DeleteMovie(id) => super::Event::DeleteConfirmed(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A transient message, shown once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NoticeLevel::Info => f.write_str(&self.message),
            NoticeLevel::Error => write!(f, "error: {}", self.message),
        }
    }
}
