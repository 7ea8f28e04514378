//! Colour styling for human-readable CLI output.
//!
//! Palette is Ayu Dark (<https://github.com/ayu-theme/ayu-colors>). Only
//! states worth noticing get colour: in-progress and blocked work, finished
//! work dimmed, zero-hour members muted.

use owo_colors::OwoColorize;
use sprintload_core::enums::{ItemStatus, ItemType};

use crate::terminal::supports_color;

const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c
const WARN: (u8, u8, u8) = (0xff, 0xb4, 0x54); // #ffb454
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff

const STATUS_IN_PROGRESS: (u8, u8, u8) = (0xff, 0xb4, 0x54);
const STATUS_BLOCKED: (u8, u8, u8) = (0xf2, 0x6d, 0x78);
const STATUS_DONE: (u8, u8, u8) = (0x80, 0x90, 0xa0);

const TYPE_BUG: (u8, u8, u8) = (0xf2, 0x6d, 0x78);
const TYPE_EPIC: (u8, u8, u8) = (0xd2, 0xa6, 0xff);

pub const ICON_PASS: &str = "\u{2713}"; // ✓
pub const ICON_WARN: &str = "\u{26A0}"; // ⚠

/// Marker printed in place of a missing date.
pub const EMPTY_CELL: &str = "-";

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

fn color_bold_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).bold().to_string()
    } else {
        s.to_string()
    }
}

// ---------------------------------------------------------------------------
// Semantic helpers
// ---------------------------------------------------------------------------

pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

pub fn render_accent(s: &str) -> String {
    color_str(s, ACCENT)
}

pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

/// Section heading: accent colour, bold.
pub fn render_heading(s: &str) -> String {
    color_bold_str(s, ACCENT)
}

pub fn render_pass_icon() -> String {
    color_str(ICON_PASS, PASS)
}

pub fn render_warn_icon() -> String {
    color_str(ICON_WARN, WARN)
}

// ---------------------------------------------------------------------------
// Domain rendering
// ---------------------------------------------------------------------------

/// Status with semantic colouring; `To Do` and custom statuses stay plain.
pub fn render_status(status: &ItemStatus) -> String {
    let s = status.as_str();
    match status {
        ItemStatus::InProgress | ItemStatus::InReview => color_str(s, STATUS_IN_PROGRESS),
        ItemStatus::Blocked => color_str(s, STATUS_BLOCKED),
        ItemStatus::Done | ItemStatus::WontDo => color_str(s, STATUS_DONE),
        _ => s.to_string(),
    }
}

/// Item type; bugs and epics get colour.
pub fn render_type(item_type: &ItemType) -> String {
    let s = item_type.as_str();
    match item_type {
        ItemType::Bug => color_str(s, TYPE_BUG),
        ItemType::Epic => color_str(s, TYPE_EPIC),
        _ => s.to_string(),
    }
}

/// Hour figure with two decimals; zero is muted.
pub fn render_hours(hours: f64) -> String {
    let text = format!("{hours:.2}");
    if hours == 0.0 {
        render_muted(&text)
    } else {
        text
    }
}
