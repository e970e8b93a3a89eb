//! Formatting utilities used for CLI and export outputs.

use crate::models::TableStatus;

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

pub fn covers(n: u32) -> String {
    if n == 1 {
        "1 cover".to_string()
    } else {
        format!("{n} covers")
    }
}

/// Wrap a free-text note to the given width, indenting continuation lines.
pub fn wrap_note(note: &str, width: usize, indent: &str) -> String {
    let opts = textwrap::Options::new(width).subsequent_indent(indent);
    textwrap::fill(note, opts)
}

/// Restituisce una descrizione testuale e un colore ANSI per lo stato del tavolo.
pub fn describe_status(status: TableStatus) -> (&'static str, &'static str) {
    match status {
        TableStatus::Free => ("free", "\x1b[32m"),
        TableStatus::Reserved => ("reserved", "\x1b[33m"),
        TableStatus::Occupied => ("occupied", "\x1b[31m"),
    }
}
