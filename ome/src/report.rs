//! Reporting mode: classify, then export, plot, and print.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::core::activity::classify;
use crate::core::histogram::Histogram;
use crate::core::types::{Classification, InactivityEntry};
use crate::io::export::write_report_json;
use crate::io::mailman::ListDirectory;
use crate::io::plot::write_histogram_png;

/// Optional artifacts produced alongside the text report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    /// Write the JSON report here when set.
    pub export_path: Option<PathBuf>,
    /// Write the histogram PNG here when set.
    pub plot_path: Option<PathBuf>,
}

/// Fetch lists, classify them, and emit the requested artifacts.
///
/// Text lines go to `out` after any files are written.
pub fn run_report<D, W>(
    directory: &D,
    threshold_days: u32,
    now: DateTime<Utc>,
    options: &ReportOptions,
    out: &mut W,
) -> Result<Classification>
where
    D: ListDirectory,
    W: Write,
{
    let records = directory.lists().context("fetch mailing lists")?;
    let classification = classify(records, threshold_days, now);
    for invalid in &classification.invalid {
        warn!(list = %invalid.identifier, field = %invalid.field, value = %invalid.value, "skipping list with invalid timestamp");
    }
    info!(
        stale = classification.stale.len(),
        threshold_days, "classified mailing lists"
    );

    if let Some(path) = &options.export_path {
        write_report_json(path, &classification.stale)?;
        info!(path = %path.display(), "exported report");
    }
    if let Some(path) = &options.plot_path {
        write_histogram_png(path, &Histogram::build(&classification.days()))?;
        info!(path = %path.display(), "rendered histogram");
    }

    out.write_all(render_text(&classification.stale).as_bytes())
        .context("write report")?;
    Ok(classification)
}

/// Human-readable block per stale list.
pub fn render_text(stale: &BTreeMap<String, InactivityEntry>) -> String {
    let mut buf = String::new();
    for (identifier, entry) in stale {
        buf.push_str(&format!(
            "{}:\n \tNot used for {} days\n\tLast post at {}\n",
            identifier, entry.days_inactive, entry.last_post_at
        ));
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::NEVER_POSTED_SENTINEL;
    use crate::test_support::{ScriptedDirectory, at, record};

    fn directory() -> ScriptedDirectory {
        ScriptedDirectory::new(vec![
            record("old@example.com", Some("2020-01-01T00:00:00"), "2019-01-01"),
            record("quiet@example.com", Some(NEVER_POSTED_SENTINEL), "2023-01-01"),
            record("busy@example.com", Some("2023-12-30T00:00:00"), "2019-01-01"),
            record("blank@example.com", Some(""), "2019-01-01"),
        ])
    }

    #[test]
    fn prints_one_block_per_stale_list() {
        let mut out = Vec::new();
        run_report(
            &directory(),
            300,
            at("2024-01-01T00:00:00"),
            &ReportOptions::default(),
            &mut out,
        )
        .expect("report");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(
            text,
            "old@example.com:\n \tNot used for 1461 days\n\tLast post at 2020-01-01T00:00:00\n\
             quiet@example.com:\n \tNot used for 365 days\n\tLast post at 1970-01-01T00:00:00\n"
        );
    }

    #[test]
    fn writes_requested_artifacts() {
        let temp = tempfile::tempdir().expect("tempdir");
        let options = ReportOptions {
            export_path: Some(temp.path().join("mlists.json")),
            plot_path: Some(temp.path().join("mlists.png")),
        };
        let directory = directory();
        let result = run_report(
            &directory,
            300,
            at("2024-01-01T00:00:00"),
            &options,
            &mut Vec::new(),
        )
        .expect("report");
        assert_eq!(result.stale.len(), 2);
        assert!(temp.path().join("mlists.json").is_file());
        assert!(temp.path().join("mlists.png").is_file());
        assert!(directory.deleted().is_empty());
    }

    #[test]
    fn empty_directory_still_renders_histogram() {
        let temp = tempfile::tempdir().expect("tempdir");
        let options = ReportOptions {
            export_path: None,
            plot_path: Some(temp.path().join("empty.png")),
        };
        let result = run_report(
            &ScriptedDirectory::new(Vec::new()),
            30,
            at("2024-01-01T00:00:00"),
            &options,
            &mut Vec::new(),
        )
        .expect("report");
        assert!(result.stale.is_empty());
        assert!(temp.path().join("empty.png").is_file());
    }

    #[test]
    fn fetch_failure_aborts_report() {
        let directory = ScriptedDirectory::unreachable();
        let err = run_report(
            &directory,
            30,
            at("2024-01-01T00:00:00"),
            &ReportOptions::default(),
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("fetch mailing lists"));
    }
}
