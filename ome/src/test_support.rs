//! Test-only helpers: record builders and a scripted list directory.

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};

use crate::core::timestamp::parse_timestamp;
use crate::core::types::ListRecord;
use crate::io::mailman::{ListDirectory, RemoteError};

/// Build a record with the given raw `last_post_at` and `created_at` values.
pub fn record(identifier: &str, last_post_at: Option<&str>, created_at: &str) -> ListRecord {
    ListRecord::new(identifier, last_post_at, created_at)
}

/// Parse a fixed evaluation instant.
pub fn at(timestamp: &str) -> DateTime<Utc> {
    parse_timestamp(timestamp).unwrap_or_else(|| panic!("invalid test timestamp {timestamp}"))
}

/// In-memory directory that serves fixed records and records delete calls.
///
/// Deletes succeed unless a failure was scripted for that identifier.
pub struct ScriptedDirectory {
    records: Vec<ListRecord>,
    reachable: bool,
    failures: HashMap<String, RemoteError>,
    calls: RefCell<Vec<String>>,
    deleted: RefCell<Vec<String>>,
}

impl ScriptedDirectory {
    pub fn new(records: Vec<ListRecord>) -> Self {
        Self {
            records,
            reachable: true,
            failures: HashMap::new(),
            calls: RefCell::new(Vec::new()),
            deleted: RefCell::new(Vec::new()),
        }
    }

    /// Directory whose listing call fails like a dead server.
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_failure(mut self, identifier: &str, error: RemoteError) -> Self {
        self.failures.insert(identifier.to_string(), error);
        self
    }

    /// Every identifier passed to `delete`, in call order.
    pub fn delete_calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Identifiers whose delete succeeded, in call order.
    pub fn deleted(&self) -> Vec<String> {
        self.deleted.borrow().clone()
    }
}

impl ListDirectory for ScriptedDirectory {
    fn lists(&self) -> Result<Vec<ListRecord>> {
        if !self.reachable {
            return Err(anyhow!("GET http://scripted/lists: connection refused"));
        }
        Ok(self.records.clone())
    }

    fn delete(&self, identifier: &str) -> std::result::Result<(), RemoteError> {
        self.calls.borrow_mut().push(identifier.to_string());
        if let Some(error) = self.failures.get(identifier) {
            return Err(error.clone());
        }
        self.deleted.borrow_mut().push(identifier.to_string());
        Ok(())
    }
}
