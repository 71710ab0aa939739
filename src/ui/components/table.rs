//! Dashboard movie table.
//!
//! Fixed-width columns for SR, name, year and producer; actors take what is
//! left. The id column (needed for `open /edit/<id>`) is only shown to
//! signed-in users, together with the actions hint.

use crate::ui::helpers::{fit, truncate};
use crate::ui::viewmodel::{DashboardView, MovieRow};
use std::io::{self, Write};

const SR_WIDTH: usize = 4;
const NAME_WIDTH: usize = 28;
const YEAR_WIDTH: usize = 6;
const PRODUCER_WIDTH: usize = 20;
const ID_WIDTH: usize = 26;
const MIN_ACTORS_WIDTH: usize = 10;

fn fixed_width(show_actions: bool) -> usize {
    let base = SR_WIDTH + NAME_WIDTH + YEAR_WIDTH + PRODUCER_WIDTH;
    if show_actions {
        base + ID_WIDTH
    } else {
        base
    }
}

fn actors_width(show_actions: bool, cols: usize) -> usize {
    cols.saturating_sub(fixed_width(show_actions))
        .max(MIN_ACTORS_WIDTH)
}

/// Renders the column headers.
pub fn render_table_headers<W: Write>(out: &mut W, show_actions: bool, cols: usize) -> io::Result<()> {
    write!(
        out,
        "{}{}{}{}",
        fit("SR", SR_WIDTH),
        fit("NAME", NAME_WIDTH),
        fit("YEAR", YEAR_WIDTH),
        fit("PRODUCER", PRODUCER_WIDTH),
    )?;
    if show_actions {
        write!(out, "{}", fit("ID (edit/delete)", ID_WIDTH))?;
    }
    writeln!(out, "{}", truncate("ACTORS", actors_width(show_actions, cols)))
}

/// Renders every row of the dashboard.
pub fn render_table_rows<W: Write>(out: &mut W, view: &DashboardView, cols: usize) -> io::Result<()> {
    for row in &view.rows {
        render_table_row(out, row, view.show_actions, cols)?;
    }
    Ok(())
}

fn render_table_row<W: Write>(
    out: &mut W,
    row: &MovieRow,
    show_actions: bool,
    cols: usize,
) -> io::Result<()> {
    write!(
        out,
        "{}{} {}{}",
        fit(&row.sr.to_string(), SR_WIDTH),
        fit(&row.name, NAME_WIDTH - 1),
        fit(&row.year.to_string(), YEAR_WIDTH - 1),
        fit(&row.producer, PRODUCER_WIDTH),
    )?;
    if show_actions {
        write!(out, "{}", fit(&row.id, ID_WIDTH))?;
    }
    writeln!(out, "{}", truncate(&row.actors, actors_width(show_actions, cols)))
}
