//! Timestamp parsing for list server values.
//!
//! The list server emits naive ISO-8601 values in UTC, optionally with a
//! fractional second. Offsets and bare dates are accepted as well.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which record field carried the bad value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampField {
    LastPostAt,
    CreatedAt,
}

impl fmt::Display for TimestampField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampField::LastPostAt => f.write_str("last_post_at"),
            TimestampField::CreatedAt => f.write_str("created_at"),
        }
    }
}

/// A record timestamp that could not be parsed. Scoped to one record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{identifier}: invalid {field} timestamp {value:?}")]
pub struct InvalidTimestamp {
    pub identifier: String,
    pub field: TimestampField,
    pub value: String,
}

/// Parse a timestamp into UTC. Returns `None` for unrecognized input.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// Whole days elapsed from `reference` to `now`, truncated; never negative.
pub fn whole_days_between(reference: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from(now.signed_duration_since(reference).num_days()).unwrap_or(0)
}
