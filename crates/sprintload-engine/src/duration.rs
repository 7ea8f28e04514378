//! Interval-to-hours conversion.

use chrono::{DateTime, Utc};
use sprintload_core::Overrides;

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Hours worked on `key` between `start` and `end`.
///
/// A manual override for `key` is returned verbatim, whatever its value.
/// Otherwise the span is converted to hours, negative spans clamp to zero,
/// and the result is truncated (not rounded) to two decimal places.
pub fn resolve_duration(
    key: &str,
    overrides: &Overrides,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> f64 {
    if let Some(hours) = overrides.get(key) {
        return hours;
    }
    hours_between(start, end)
}

/// Non-negative hours between two instants, truncated to hundredths.
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return 0.0;
    }
    truncate_hundredths(millis as f64 / MILLIS_PER_HOUR)
}

/// Truncates toward zero at the hundredths digit: `1.239 -> 1.23`.
pub fn truncate_hundredths(hours: f64) -> f64 {
    (hours * 100.0).trunc() / 100.0
}
