//! Plain-text rendering of the application screens.
//!
//! ```text
//! AppState → compute_viewmodel → ViewModel → render → io::Write
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Per-screen component renderers
//! - [`helpers`]: Truncation, padding and wrapping

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use viewmodel::{Body, EmptyState, FooterInfo, HeaderInfo, ViewModel};
