//! Shared text layout utilities.
//!
//! Widths are counted in `char`s, which is good enough for the catalog's
//! mostly-Latin titles.

/// Shortens `text` to at most `width` chars, ending with `…` when cut.
#[must_use]
pub fn truncate(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

/// Truncates or right-pads `text` to exactly `width` chars.
#[must_use]
pub fn fit(text: &str, width: usize) -> String {
    let cut = truncate(text, width);
    let pad = width.saturating_sub(cut.chars().count());
    format!("{cut}{}", " ".repeat(pad))
}

/// Centers `text` within `cols`, truncating when it does not fit.
#[must_use]
pub fn centered(text: &str, cols: usize) -> String {
    let cut = truncate(text, cols);
    let padding = cols.saturating_sub(cut.chars().count()) / 2;
    format!("{}{cut}", " ".repeat(padding))
}

/// Horizontal rule spanning `cols`.
#[must_use]
pub fn border(cols: usize) -> String {
    "─".repeat(cols)
}

/// Greedy word wrap at `width` chars. Words longer than a line are split.
#[must_use]
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..width).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }
        let needed = if line.is_empty() { 0 } else { 1 } + word.chars().count();
        if !line.is_empty() && line.chars().count() + needed > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(&word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
