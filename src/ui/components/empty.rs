//! Empty state message.

use crate::ui::helpers::centered;
use crate::ui::viewmodel::EmptyState;
use std::io::{self, Write};

/// Two centered lines with a blank line above.
pub fn render_empty_state<W: Write>(out: &mut W, empty: &EmptyState, cols: usize) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", centered(&empty.message, cols))?;
    writeln!(out, "{}", centered(&empty.subtitle, cols))
}
