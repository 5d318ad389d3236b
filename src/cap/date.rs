//! CAP date-time values
//!
//! CAP dates are `YYYY-MM-DDThh:mm:ss` with an optional two or three digit
//! fraction and a mandatory `+hh:mm` / `-hh:mm` offset. `Z` is not allowed.

use chrono::{DateTime, FixedOffset};
use regex::Regex;
use std::sync::LazyLock;

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[0-9]{4}-[01][0-9]-[0-3][0-9]T[0-2][0-9]:[0-5][0-9]:[0-5][0-9](\.[0-9]{2}[0-9]?)?([+-])([01][0-9]):([0-5][0-9])$",
    )
    .expect("valid regex")
});

/// Whether `value` is a complete, calendar-valid CAP date.
pub fn is_valid(value: &str) -> bool {
    parse(value).is_some()
}

/// Parse a CAP date. `-00:00` is accepted and treated as UTC.
pub fn parse(value: &str) -> Option<DateTime<FixedOffset>> {
    let value = value.trim();
    if !DATE_PATTERN.is_match(value) {
        return None;
    }

    let normalized = match value.strip_suffix("-00:00") {
        Some(head) => format!("{head}+00:00"),
        None => value.to_string(),
    };
    DateTime::parse_from_rfc3339(&normalized).ok()
}

/// Offset from UTC in minutes, or `None` when `value` is not a valid date.
pub fn timezone_offset_minutes(value: &str) -> Option<i32> {
    let value = value.trim();
    parse(value)?;

    let caps = DATE_PATTERN.captures(value)?;
    let sign = if &caps[2] == "-" { -1 } else { 1 };
    let hours: i32 = caps[3].parse().ok()?;
    let minutes: i32 = caps[4].parse().ok()?;
    Some(sign * (hours * 60 + minutes))
}
