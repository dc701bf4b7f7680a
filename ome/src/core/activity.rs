//! Inactivity classification of mailing lists.
//!
//! [`is_stale`] is the single predicate behind both the report
//! ([`classify`]) and the removal pass, so the two can never disagree about
//! which lists are stale.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::core::timestamp::{InvalidTimestamp, TimestampField, parse_timestamp, whole_days_between};
use crate::core::types::{Classification, InactivityEntry, LastPost, ListRecord};

/// Whole days since the record's reference timestamp.
///
/// Returns `Ok(None)` for records without any `last_post_at` value.
pub fn days_inactive(
    record: &ListRecord,
    now: DateTime<Utc>,
) -> Result<Option<u64>, InvalidTimestamp> {
    let Some(reference) = record.reference_timestamp() else {
        return Ok(None);
    };
    let parsed = parse_timestamp(reference).ok_or_else(|| InvalidTimestamp {
        identifier: record.identifier.clone(),
        field: match record.last_post {
            LastPost::Never => TimestampField::CreatedAt,
            _ => TimestampField::LastPostAt,
        },
        value: reference.to_string(),
    })?;
    Ok(Some(whole_days_between(parsed, now)))
}

/// Days of inactivity if the record meets the threshold (boundary included).
pub fn is_stale(
    record: &ListRecord,
    now: DateTime<Utc>,
    threshold_days: u32,
) -> Result<Option<u64>, InvalidTimestamp> {
    Ok(days_inactive(record, now)?.filter(|days| *days >= u64::from(threshold_days)))
}

/// Partition records into stale entries, dropping active and absent ones.
///
/// Records with unparsable timestamps are skipped and reported in
/// [`Classification::invalid`]; they never abort the pass. Only the first
/// occurrence of an identifier is evaluated, whatever its outcome; later
/// repeats are ignored, the same rule the removal pass applies.
pub fn classify<I>(records: I, threshold_days: u32, now: DateTime<Utc>) -> Classification
where
    I: IntoIterator<Item = ListRecord>,
{
    let mut classification = Classification::default();
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.identifier.clone()) {
            continue;
        }
        match is_stale(&record, now, threshold_days) {
            Ok(Some(days)) => {
                let entry = InactivityEntry {
                    last_post_at: record.last_post.raw().unwrap_or_default().to_string(),
                    days_inactive: days,
                    reference_timestamp: record
                        .reference_timestamp()
                        .unwrap_or_default()
                        .to_string(),
                };
                classification.stale.insert(record.identifier, entry);
            }
            Ok(None) => {}
            Err(invalid) => classification.invalid.push(invalid),
        }
    }
    classification
}
