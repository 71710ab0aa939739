//! Application layer coordinating state, events, and actions.
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └──────── Worker Responses ────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`routes`]: Screens, their paths and access rules
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use cinedex::app::{handle_event, AppState, Event, Route};
//!
//! let mut state = AppState::new();
//! let (redraw, actions) = handle_event(&mut state, &Event::Navigate(Route::AddMovie))?;
//! assert!(redraw);
//! assert!(actions.is_empty());
//! assert_eq!(state.route, Route::Login);
//! # Ok::<(), cinedex::CinedexError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod routes;
pub mod state;

pub use actions::{Action, Confirmation, Notice, NoticeLevel};
pub use handler::{handle_event, Event, FormEvent};
pub use routes::{Access, Route};
pub use state::AppState;
