//! Field Validators
//!
//! Pure predicates over raw field values. None of them panic or allocate
//! beyond trimming; each answers a plain `bool`.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

/// Local part (dotted atoms or a quoted string), `@`, then an IPv4 literal or
/// dotted labels ending in a TLD of two letters or more.
const EMAIL_PATTERN: &str = concat!(
    r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))"#,
    r"@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$",
);

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

/// Naive date-time shapes accepted after RFC 3339 and plain dates
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Whether the string has the shape of an email address
pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Parse a date string to milliseconds since the Unix epoch (UTC)
///
/// `1970-01-01` parses to `Some(0)`, a real instant like any other.
pub fn parse_timestamp(value: &str) -> Option<i64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.timestamp_millis());
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis());
    }

    NAIVE_DATETIME_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(value, fmt)
            .ok()
            .map(|dt| dt.and_utc().timestamp_millis())
    })
}

/// Parse an optionally signed base-10 integer, surrounding whitespace allowed
pub fn parse_int(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// First and last names: more than 2 characters once trimmed
pub fn validate_name_field(value: &str) -> bool {
    value.trim().chars().count() > 2
}

pub fn validate_email_field(value: &str) -> bool {
    is_email(value)
}

/// Birth date: a real calendar date that is not after `now`
pub fn validate_date_field(value: &str, now: DateTime<Utc>) -> bool {
    parse_timestamp(value).is_some_and(|ts| ts <= now.timestamp_millis())
}

/// Quantity: an optionally signed whole number that fits in `i64`
pub fn validate_quantity_field(value: &str) -> bool {
    parse_int(value).is_some()
}

/// Location: one radio of the group is selected
pub fn validate_location_field(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// Terms of service: the box is checked
pub fn validate_tos_field(checked: bool) -> bool {
    checked
}
