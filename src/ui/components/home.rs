//! Home screen: numbered movie strip and the featured movie.

use crate::ui::helpers::{truncate, wrap};
use crate::ui::viewmodel::{FeaturedMovie, StripItem};
use std::io::{self, Write};

const PLOT_INDENT: &str = "  ";

/// One line of `n. Name (year)` entries, wrapped to `cols`. The featured entry is bracketed.
pub fn render_strip<W: Write>(out: &mut W, strip: &[StripItem], cols: usize) -> io::Result<()> {
    let entries: Vec<String> = strip
        .iter()
        .map(|item| {
            let label = format!("{}. {} ({})", item.number, truncate(&item.name, 24), item.year);
            if item.is_featured {
                format!("[{label}]")
            } else {
                label
            }
        })
        .collect();

    let mut line = String::new();
    for entry in entries {
        if !line.is_empty() && line.chars().count() + 3 + entry.chars().count() > cols {
            writeln!(out, "{line}")?;
            line.clear();
        }
        if !line.is_empty() {
            line.push_str("   ");
        }
        line.push_str(&entry);
    }
    if !line.is_empty() {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub fn render_featured<W: Write>(out: &mut W, movie: &FeaturedMovie, cols: usize) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{} ({})", movie.name, movie.year)?;
    writeln!(out, "Producer: {}", movie.producer)?;
    writeln!(out, "Cast: {}", movie.actors)?;
    if !movie.poster.is_empty() {
        writeln!(out, "Poster: {}", movie.poster)?;
    }
    for line in wrap(&movie.plot, cols.saturating_sub(PLOT_INDENT.len())) {
        writeln!(out, "{PLOT_INDENT}{line}")?;
    }
    Ok(())
}
