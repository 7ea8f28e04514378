//! Output formatting helpers for the `sprintload` CLI.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Print a value as pretty-printed JSON to stdout.
///
/// Terminates the process with exit code 1 if serialization fails.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a simple aligned table.
///
/// `widths` are measured on the plain cells; `styled` cells (same shape) are
/// what gets printed, so ANSI codes do not disturb alignment.
pub fn output_table(headers: &[&str], rows: &[Vec<String>], styled: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    for (i, header) in headers.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{:<width$}", header, width = widths[i]);
    }
    let _ = writeln!(handle);

    for (i, width) in widths.iter().enumerate() {
        if i > 0 {
            let _ = write!(handle, "  ");
        }
        let _ = write!(handle, "{}", "-".repeat(*width));
    }
    let _ = writeln!(handle);

    for (plain, shown) in rows.iter().zip(styled) {
        for (i, (cell, styled_cell)) in plain.iter().zip(shown).enumerate() {
            if i > 0 {
                let _ = write!(handle, "  ");
            }
            let _ = write!(handle, "{}", styled_cell);
            if i + 1 < plain.len() && i < widths.len() {
                let pad = widths[i].saturating_sub(cell.chars().count());
                let _ = write!(handle, "{}", " ".repeat(pad));
            }
        }
        let _ = writeln!(handle);
    }
}

/// `YYYY-MM-DD HH:MM UTC`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M UTC").to_string()
}
