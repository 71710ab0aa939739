//! Header and navigation panel.

use crate::ui::helpers::{border, centered, fit};
use crate::ui::viewmodel::{HeaderInfo, NavPanel};
use std::io::{self, Write};

/// Brand line, then search box and user menu on one line, then a rule.
///
/// ```text
///                 Cinedex
/// [search: inc          ]          Login (open /login) | Sign up (open /signup)
/// ────────────────────────────────────────────────
/// ```
pub fn render_header<W: Write>(out: &mut W, header: &HeaderInfo, cols: usize) -> io::Result<()> {
    writeln!(out, "{}", centered(&header.brand, cols))?;

    let search = format!("[search: {}]", fit(&header.search_query, 20));
    let menu = header
        .user_menu
        .iter()
        .map(|entry| format!("{} ({})", entry.label, entry.command))
        .collect::<Vec<_>>()
        .join(" | ");
    let gap = cols
        .saturating_sub(search.chars().count() + menu.chars().count())
        .max(2);
    writeln!(out, "{search}{}{menu}", " ".repeat(gap))?;
    writeln!(out, "{}", border(cols))
}

/// The open navigation panel, one link per line with the active route marked.
pub fn render_nav_panel<W: Write>(out: &mut W, panel: &NavPanel, cols: usize) -> io::Result<()> {
    for link in &panel.links {
        let marker = if link.active { '>' } else { ' ' };
        writeln!(out, "{marker} {:<12} {}", link.label, link.path)?;
    }
    writeln!(out, "{}", border(cols))
}
