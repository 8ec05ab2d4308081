//! Date and time utility functions
//!
//! Backend payloads are not consistent about date encodings: incident dates
//! arrive as plain `YYYY-MM-DD` or as full RFC 3339 timestamps, audit
//! timestamps sometimes lack a timezone. Parsing is tolerant here so the rest
//! of the application only ever sees chrono types.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Date format used on the wire and as the default display format
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date in YYYY-MM-DD form, or take the date part of a timestamp
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    let trimmed = date_str.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date);
    }
    parse_timestamp(trimmed).map(|dt| dt.date_naive())
}

/// Parse a timestamp, trying several encodings in turn
///
/// Timestamps without a timezone are taken as UTC.
pub fn parse_timestamp(datetime_str: &str) -> Option<DateTime<Utc>> {
    let trimmed = datetime_str.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        // RFC3339 with timezone (e.g., "2025-01-15T14:30:00Z")
        return Some(dt.with_timezone(&Utc));
    }
    // ISO 8601 without timezone, with or without fractional seconds
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}

/// Format a NaiveDate to YYYY-MM-DD string
pub fn format_ymd(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

/// Format current local date to YYYY-MM-DD string
pub fn format_today() -> String {
    format_ymd(Local::now().date_naive())
}

/// Describe how long ago a date was, relative to `today`
///
/// Recent dates read as "today", "yesterday" or "N days ago"; anything older
/// than a month falls back to "Jan 15" or "Jan 15, 2024" for other years.
pub fn format_age(date: NaiveDate, today: NaiveDate) -> String {
    let days_diff = (today - date).num_days();

    match days_diff {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        -1 => "tomorrow".to_string(),
        diff if (2..=30).contains(&diff) => format!("{} days ago", diff),
        diff if (-30..=-2).contains(&diff) => format!("in {} days", -diff),
        _ => {
            use chrono::Datelike;
            if date.year() == today.year() {
                date.format("%b %d").to_string()
            } else {
                date.format("%b %d, %Y").to_string()
            }
        }
    }
}

/// Days between two dates, never negative
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days().max(0)
}
