//! Shared utility functions for coercing and displaying record fields.

use crate::error::{Result, TrackerError};
use chrono::NaiveDate;

/// Date layouts accepted for record dates, tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Coerces a textual record date to a calendar date.
///
/// Any time-of-day suffix (`T...` or a space separated clock time) is
/// dropped; only the calendar date is kept.
pub fn parse_record_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    let date_part = trimmed
        .split_once('T')
        .or_else(|| trimmed.split_once(' '))
        .map_or(trimmed, |(date, _)| date);

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
        .ok_or_else(|| TrackerError::invalid_date(raw))
}

/// Coerces a textual plastic amount to kilograms.
///
/// Only finite values are accepted. Negative values pass through, since the
/// tracker performs no validation beyond type coercion.
pub fn parse_amount(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| TrackerError::invalid_number(raw))
}

/// Formats a date the way the record store writes it.
pub fn format_record_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Escapes text for safe inclusion in HTML.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
