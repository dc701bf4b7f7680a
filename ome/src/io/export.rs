//! JSON export of the stale-list report.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::core::types::InactivityEntry;

/// Default file name for the exported report.
pub const DEFAULT_JSON_PATH: &str = "mlists.json";

/// Write `identifier -> {last_post_at, not_used_for}` as pretty JSON with a
/// trailing newline.
pub fn write_report_json(path: &Path, stale: &BTreeMap<String, InactivityEntry>) -> Result<()> {
    let mut payload = serde_json::to_string_pretty(stale).context("serialize report json")?;
    payload.push('\n');
    fs::write(path, payload).with_context(|| format!("write {}", path.display()))
}
