//! Login and sign-up screens.

use crate::ui::viewmodel::AuthView;
use std::io::{self, Write};

pub fn render_auth<W: Write>(out: &mut W, view: &AuthView) -> io::Result<()> {
    writeln!(out, "{}", view.title)?;
    writeln!(out)?;
    if view.pending {
        writeln!(out, "Signing in...")?;
    } else {
        writeln!(out, "Usage: {}", view.command)?;
    }
    if let Some(error) = &view.error {
        writeln!(out, "error: {error}")?;
    }
    Ok(())
}
