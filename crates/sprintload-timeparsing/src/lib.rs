//! Timestamp parsing for tracker changelogs.
//!
//! Trackers disagree on how they print instants. Two shapes are accepted:
//!
//! - the fixed-offset tracker format `2024-03-20T10:00:00.000+0000`
//!   (fractional seconds optional, offset without a colon)
//! - RFC 3339 (`2024-03-20T10:00:00Z`, `2024-03-20T12:00:00+02:00`)
//!
//! Every parsed value is normalised to UTC.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use thiserror::Error;

/// The tracker's native changelog format (offset without a colon).
pub const FIXED_OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";

/// Calendar-day format used in reports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors produced while parsing changelog timestamps.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    /// The input was empty or whitespace.
    #[error("empty timestamp")]
    Empty,

    /// The input matched none of the accepted formats.
    #[error("unrecognised timestamp '{input}': expected {FIXED_OFFSET_FORMAT} or RFC 3339")]
    Unrecognised {
        /// The rejected input.
        input: String,
    },
}

/// A specialized `Result` type for timestamp parsing.
pub type Result<T> = std::result::Result<T, TimeParseError>;

/// Parses a changelog timestamp into UTC.
///
/// The fixed-offset tracker format is tried first, then RFC 3339.
///
/// # Errors
///
/// Returns [`TimeParseError::Empty`] for blank input and
/// [`TimeParseError::Unrecognised`] when neither format matches.
pub fn parse_changelog_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(trimmed, FIXED_OFFSET_FORMAT) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    Err(TimeParseError::Unrecognised {
        input: trimmed.to_string(),
    })
}

/// Like [`parse_changelog_timestamp`] but discards the error.
///
/// Used where an unparsable entry is skipped rather than reported.
pub fn try_parse_changelog_timestamp(input: &str) -> Option<DateTime<Utc>> {
    parse_changelog_timestamp(input).ok()
}

/// Formats the UTC calendar day of `ts` as `YYYY-MM-DD`.
pub fn format_date(ts: DateTime<Utc>) -> String {
    ts.format(DATE_FORMAT).to_string()
}

/// Returns `true` if both instants fall on the same UTC calendar day.
pub fn same_calendar_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    calendar_day(a) == calendar_day(b)
}

fn calendar_day(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}
