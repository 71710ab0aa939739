//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where cinedex keeps its session file and trace output.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, resolve_data_dir, session_file, trace_file};
