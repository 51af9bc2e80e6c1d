//! Date formatting for outbound emails.

use chrono::{DateTime, Utc};

/// Long-form English date for a UTC timestamp, e.g. `August 4, 2024`.
///
/// Deterministic: month names are always English, the calendar date is
/// taken in UTC.
pub fn format_long_date(ts: DateTime<Utc>) -> String {
    ts.format("%B %-d, %Y").to_string()
}
