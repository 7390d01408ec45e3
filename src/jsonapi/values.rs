//! Display formatting for attribute values.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Currency / quantity style: two decimal places.
pub fn format_decimal(value: f64) -> String {
    format!("{value:.2}")
}

/// Best-effort ISO 8601 reformat; unparseable input is returned trimmed but
/// otherwise untouched.
pub fn format_datetime(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc).format("%Y-%m-%d %H:%M UTC").to_string();
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.format("%Y-%m-%d %H:%M").to_string();
    }
    format_date(raw)
}

pub fn format_date(raw: &str) -> String {
    let raw = raw.trim();
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%Y-%m-%d").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Comma separated flag values; blanks dropped.
pub fn split_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
