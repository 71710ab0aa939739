//! Screen components.
//!
//! Each component writes plain text lines to any [`std::io::Write`].
//!
//! # Components
//!
//! - `header`: brand, search box, user menu, navigation panel
//! - `footer`: command hints
//! - `home`: movie strip and featured movie
//! - `table`: dashboard movie table
//! - `form`: add/edit form
//! - `auth`: login and sign-up
//! - `empty`: empty state message

mod auth;
mod empty;
mod footer;
mod form;
mod header;
mod home;
mod table;

pub use auth::render_auth;
pub use empty::render_empty_state;
pub use footer::render_footer;
pub use form::render_form;
pub use header::{render_header, render_nav_panel};

use crate::ui::viewmodel::{DashboardView, HomeView};
use std::io::{self, Write};

fn render_status<W: Write>(out: &mut W, loading: bool, error: Option<&str>) -> io::Result<()> {
    if loading {
        writeln!(out, "Loading...")?;
    }
    if let Some(error) = error {
        writeln!(out, "error: {error}")?;
    }
    Ok(())
}

/// Home layout:
/// ```text
/// [status]
/// [strip]
/// [featured movie]
/// ```
pub fn render_home<W: Write>(out: &mut W, view: &HomeView, cols: usize) -> io::Result<()> {
    render_status(out, view.loading, view.error.as_deref())?;
    if let Some(empty) = &view.empty_state {
        if !view.loading {
            return render_empty_state(out, empty, cols);
        }
        return Ok(());
    }
    home::render_strip(out, &view.strip, cols)?;
    if let Some(featured) = &view.featured {
        home::render_featured(out, featured, cols)?;
    }
    Ok(())
}

/// Dashboard layout:
/// ```text
/// [status]
/// [table headers]
/// [table rows]
/// ```
pub fn render_dashboard<W: Write>(out: &mut W, view: &DashboardView, cols: usize) -> io::Result<()> {
    render_status(out, view.loading, view.error.as_deref())?;
    if let Some(empty) = &view.empty_state {
        if !view.loading {
            return render_empty_state(out, empty, cols);
        }
        return Ok(());
    }
    table::render_table_headers(out, view.show_actions, cols)?;
    table::render_table_rows(out, view, cols)
}
