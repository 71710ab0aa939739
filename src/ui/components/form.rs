//! Add/edit movie form.
//!
//! Every field is listed with the key the `set` command expects, its current
//! value and, below it, the validation message if the field is invalid.

use crate::ui::helpers::truncate;
use crate::ui::viewmodel::FormView;
use std::io::{self, Write};

const KEY_WIDTH: usize = 18;

pub fn render_form<W: Write>(out: &mut W, form: &FormView, cols: usize) -> io::Result<()> {
    writeln!(out, "{}", form.title)?;
    if form.submitting {
        writeln!(out, "Saving...")?;
    }
    if let Some(error) = &form.error {
        writeln!(out, "error: {error}")?;
    }

    let value_width = cols.saturating_sub(KEY_WIDTH + 2).max(8);
    for section in &form.sections {
        writeln!(out)?;
        writeln!(out, "{}", section.title)?;
        for row in &section.rows {
            let value = if row.value.is_empty() { "-" } else { row.value.as_str() };
            writeln!(
                out,
                "  {:<KEY_WIDTH$}{}",
                row.key,
                truncate(value, value_width)
            )?;
            if let Some(error) = &row.error {
                writeln!(out, "  {:<KEY_WIDTH$}! {error}", "")?;
            }
        }
    }
    Ok(())
}
