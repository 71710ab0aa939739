//! Footer with command hints.

use crate::ui::helpers::{border, centered};
use crate::ui::viewmodel::FooterInfo;
use std::io::{self, Write};

/// Renders a rule and the centered hints, truncated on narrow terminals.
pub fn render_footer<W: Write>(out: &mut W, footer: &FooterInfo, cols: usize) -> io::Result<()> {
    writeln!(out, "{}", border(cols))?;
    writeln!(out, "{}", centered(&footer.keybindings, cols))
}
