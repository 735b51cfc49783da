//! Validation of user-supplied input before it reaches the store.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::errors::{AgendaError, AgendaResult};

/// Parses a URL path id. Ids are database-assigned positive integers, so
/// anything else is rejected up front as `InvalidId`.
pub fn parse_id(raw: &str) -> AgendaResult<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AgendaError::InvalidId(format!(
            "id must be a positive integer, got '{raw}'"
        ))),
    }
}

/// Parses a timestamp field. Accepts RFC 3339 (`2024-06-10T10:00:00Z`) or a
/// naive datetime treated as UTC (`2024-06-10T10:00:00`).
pub fn parse_timestamp(field: &str, raw: &str) -> AgendaResult<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    Err(AgendaError::InvalidDate(format!(
        "{field} must be a valid timestamp, got '{raw}'"
    )))
}

/// Resolves a `YYYY-MM-DD` filter date to the inclusive UTC day bounds
/// `[00:00:00.000, 23:59:59.999]` used by the list filter.
pub fn day_bounds(raw: &str) -> AgendaResult<(DateTime<Utc>, DateTime<Utc>)> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AgendaError::InvalidDate(format!("date must be YYYY-MM-DD, got '{raw}'")))?;

    let start = date.and_hms_opt(0, 0, 0).expect("midnight is valid").and_utc();
    let end = date
        .and_hms_milli_opt(23, 59, 59, 999)
        .expect("end of day is valid")
        .and_utc();

    Ok((start, end))
}

/// Collects field errors for registration data: non-blank name, email
/// containing `@`.
pub fn validate_user_data(name: &str, email: &str) -> Vec<String> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push("'name' must be a non-empty string".to_string());
    }
    if !email.contains('@') {
        errors.push("'email' must be a valid email address".to_string());
    }

    errors
}
