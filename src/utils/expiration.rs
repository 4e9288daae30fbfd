//! Expiration input resolution.
//!
//! Accepts an explicit date-time (`2025-08-31T23:59`, full RFC 3339) or a
//! relative hour count (`48h`). Absent input means one day from now.

use crate::error::AppError;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Lifetime applied when no expiration is supplied.
pub const DEFAULT_TTL_HOURS: i64 = 24;

static ISO_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T").unwrap());

static RELATIVE_HOURS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(\d+)\s*h$").unwrap());

/// `datetime-local` inputs carry no offset and may omit seconds.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Resolves an optional expiration input to an absolute UTC instant.
///
/// Date-times without an offset are taken as UTC.
///
/// # Errors
///
/// Returns [`AppError::Parse`] if the input matches none of the accepted
/// forms or the relative offset overflows.
pub fn resolve_expiration(
    input: Option<&str>,
    now: DateTime<Utc>,
) -> Result<DateTime<Utc>, AppError> {
    let raw = match input.map(str::trim) {
        None | Some("") => return add_hours(now, DEFAULT_TTL_HOURS, ""),
        Some(raw) => raw,
    };

    if ISO_PREFIX_REGEX.is_match(raw) {
        return parse_date_time(raw).ok_or_else(|| invalid(raw));
    }

    if let Some(caps) = RELATIVE_HOURS_REGEX.captures(raw) {
        let hours: i64 = caps[1].parse().map_err(|_| invalid(raw))?;
        return add_hours(now, hours, raw);
    }

    parse_date_time(raw)
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc())
        })
        .or_else(|| {
            DateTime::parse_from_rfc2822(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
        .ok_or_else(|| invalid(raw))
}

/// Formats an instant for an HTML `datetime-local` input (`YYYY-MM-DDTHH:MM`).
pub fn to_datetime_local(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%dT%H:%M").to_string()
}

fn parse_date_time(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.and_utc())
}

fn add_hours(now: DateTime<Utc>, hours: i64, raw: &str) -> Result<DateTime<Utc>, AppError> {
    Duration::try_hours(hours)
        .and_then(|d| now.checked_add_signed(d))
        .ok_or_else(|| invalid(raw))
}

fn invalid(raw: &str) -> AppError {
    AppError::parse(
        format!("Invalid expiration: {raw}"),
        json!({ "expires": raw }),
    )
}
