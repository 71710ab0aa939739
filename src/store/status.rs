//! Operation lifecycle shared by the catalog store and the worker.

use crate::domain::MovieId;
use std::fmt;

/// The four catalog operations. Each kind has its own lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpKind {
    Fetch,
    Create,
    Update,
    Delete,
}

impl OpKind {
    pub const ALL: [Self; 4] = [Self::Fetch, Self::Create, Self::Update, Self::Delete];
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fetch => "fetch",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// `Idle → Pending → (Fulfilled | Rejected)`, restarting at `Pending`.
///
/// A rejection message stays visible until the same kind starts again.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OpState {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected(String),
}

impl OpState {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) => Some(message),
            _ => None,
        }
    }
}

/// Handle for one in-flight operation.
///
/// Issued when the operation begins and handed back with its outcome.
/// `seq` increases monotonically across all operations of a store, which is
/// what lets late responses for the same movie be recognised and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub kind: OpKind,
    pub seq: u64,
    pub target: Option<MovieId>,
}
