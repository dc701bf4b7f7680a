//! Shared deterministic types for the activity classifier.
//!
//! These types define stable contracts between the directory client, the
//! classifier, and the report adapters. They hold no references to remote
//! state; records are fetched fresh on every run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::timestamp::InvalidTimestamp;

/// Value the list server reports as `last_post_at` when nothing was ever posted.
pub const NEVER_POSTED_SENTINEL: &str = "1970-01-01T00:00:00";

/// Decoded `last_post_at` field of a list record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastPost {
    /// No value at all (missing, null, or empty). Such records are skipped.
    Absent,
    /// The server reported the epoch sentinel: the list never saw a post.
    Never,
    /// Raw last-post timestamp as read from the server.
    At(String),
}

impl LastPost {
    /// Decode the raw field, mapping the sentinel to [`LastPost::Never`].
    ///
    /// Surrounding whitespace is ignored when checking for a blank value or
    /// the sentinel; a dated value is kept exactly as read.
    pub fn from_raw(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return LastPost::Absent;
        };
        match raw.trim() {
            "" => LastPost::Absent,
            NEVER_POSTED_SENTINEL => LastPost::Never,
            _ => LastPost::At(raw.to_string()),
        }
    }

    /// The value as originally read from the server.
    pub fn raw(&self) -> Option<&str> {
        match self {
            LastPost::Absent => None,
            LastPost::Never => Some(NEVER_POSTED_SENTINEL),
            LastPost::At(value) => Some(value.as_str()),
        }
    }
}

/// One mailing list as exposed by the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRecord {
    /// Fully-qualified list name, unique across the directory.
    pub identifier: String,
    pub last_post: LastPost,
    pub created_at: String,
}

impl ListRecord {
    pub fn new(identifier: &str, last_post_at: Option<&str>, created_at: &str) -> Self {
        Self {
            identifier: identifier.to_string(),
            last_post: LastPost::from_raw(last_post_at),
            created_at: created_at.to_string(),
        }
    }

    /// Timestamp inactivity is measured from, or `None` when the record is skipped.
    ///
    /// Lists that never saw a post fall back to their creation time.
    pub fn reference_timestamp(&self) -> Option<&str> {
        match &self.last_post {
            LastPost::Absent => None,
            LastPost::Never => Some(self.created_at.as_str()),
            LastPost::At(value) => Some(value.as_str()),
        }
    }
}

/// Report entry for a stale list.
///
/// Serializes as `{"last_post_at": ..., "not_used_for": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InactivityEntry {
    /// `last_post_at` as originally read (the sentinel stays the sentinel).
    pub last_post_at: String,
    #[serde(rename = "not_used_for")]
    pub days_inactive: u64,
    /// Timestamp the age was computed from.
    #[serde(skip)]
    pub reference_timestamp: String,
}

/// Output of a classification pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Stale lists keyed by identifier (ordered for deterministic rendering).
    pub stale: BTreeMap<String, InactivityEntry>,
    /// Records skipped because a timestamp could not be parsed.
    pub invalid: Vec<InvalidTimestamp>,
}

impl Classification {
    /// Inactivity values of every stale list, in identifier order.
    pub fn days(&self) -> Vec<u64> {
        self.stale.values().map(|entry| entry.days_inactive).collect()
    }
}

/// A deletion the server refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedRemoval {
    pub identifier: String,
    pub reason: String,
}

/// Outcome of a removal pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalSummary {
    /// Identifiers deleted, in evaluation order.
    pub removed: Vec<String>,
    pub failed: Vec<FailedRemoval>,
    pub invalid: Vec<InvalidTimestamp>,
}
