//! Removal mode: delete every stale list instead of reporting it.
//!
//! Deletion is irreversible. This module is only reached when the caller
//! asked for removal, and each run makes exactly one pass over the lists.

use std::collections::HashSet;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

use crate::core::activity::is_stale;
use crate::core::types::{FailedRemoval, ListRecord, RemovalSummary};
use crate::io::mailman::{ListDirectory, RemoteError};

/// Delete each record that meets the threshold, at most once per identifier.
///
/// A rejected delete is recorded and the pass continues. A connectivity
/// failure aborts the pass; lists already deleted stay deleted.
#[instrument(skip_all, fields(threshold_days = threshold_days))]
pub fn remove_stale<D, I>(
    directory: &D,
    records: I,
    threshold_days: u32,
    now: DateTime<Utc>,
) -> Result<RemovalSummary>
where
    D: ListDirectory,
    I: IntoIterator<Item = ListRecord>,
{
    let mut summary = RemovalSummary::default();
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.identifier.clone()) {
            warn!(list = %record.identifier, "duplicate list identifier, already evaluated");
            continue;
        }
        let days = match is_stale(&record, now, threshold_days) {
            Ok(Some(days)) => days,
            Ok(None) => continue,
            Err(invalid) => {
                warn!(list = %invalid.identifier, field = %invalid.field, value = %invalid.value, "skipping list with invalid timestamp");
                summary.invalid.push(invalid);
                continue;
            }
        };
        match directory.delete(&record.identifier) {
            Ok(()) => {
                info!(list = %record.identifier, days_inactive = days, "removed mailing list");
                summary.removed.push(record.identifier);
            }
            Err(err @ RemoteError::Rejected { .. }) => {
                warn!(list = %record.identifier, error = %err, "failed to remove mailing list");
                summary.failed.push(FailedRemoval {
                    identifier: record.identifier,
                    reason: err.to_string(),
                });
            }
            Err(err @ RemoteError::Connectivity(_)) => {
                return Err(err).with_context(|| {
                    format!(
                        "remove {} (removed {} before failure)",
                        record.identifier,
                        summary.removed.len()
                    )
                });
            }
        }
    }
    Ok(summary)
}

/// Fetch lists, remove the stale ones, and print what happened.
pub fn run_removal<D, W>(
    directory: &D,
    threshold_days: u32,
    now: DateTime<Utc>,
    out: &mut W,
) -> Result<RemovalSummary>
where
    D: ListDirectory,
    W: Write,
{
    let records = directory.lists().context("fetch mailing lists")?;
    let summary = remove_stale(directory, records, threshold_days, now)?;
    for identifier in &summary.removed {
        writeln!(out, "Removed {identifier}").context("write removal report")?;
    }
    for failed in &summary.failed {
        writeln!(out, "Failed to remove {}: {}", failed.identifier, failed.reason)
            .context("write removal report")?;
    }
    writeln!(out, "{} mailing list(s) removed", summary.removed.len())
        .context("write removal report")?;
    Ok(summary)
}
