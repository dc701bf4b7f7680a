//! Directory client for the Mailman 3 REST API.
//!
//! The [`ListDirectory`] trait decouples the reporting and removal passes
//! from the HTTP transport. Tests use a scripted directory that serves
//! in-memory records and records delete calls.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::core::types::ListRecord;
use crate::io::config::ConnectionConfig;

/// Failure of a single remote delete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// The server could not be reached; the run cannot continue.
    #[error("list server unreachable: {0}")]
    Connectivity(String),
    /// The server answered but refused the request.
    #[error("list server rejected request with status {status}")]
    Rejected { status: u16 },
}

/// Source of list records and the per-list delete action.
pub trait ListDirectory {
    /// Fetch every list with its activity timestamps.
    fn lists(&self) -> Result<Vec<ListRecord>>;

    /// Delete one list by its fully-qualified name.
    fn delete(&self, identifier: &str) -> std::result::Result<(), RemoteError>;
}

#[derive(Debug, Deserialize)]
struct ListPage {
    #[serde(default)]
    entries: Vec<ListEntry>,
}

#[derive(Debug, Deserialize)]
struct ListEntry {
    fqdn_listname: String,
    self_link: String,
}

#[derive(Debug, Deserialize)]
struct ListSettings {
    #[serde(default)]
    last_post_at: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl ListSettings {
    fn into_record(self, identifier: &str) -> ListRecord {
        ListRecord::new(
            identifier,
            self.last_post_at.as_deref(),
            self.created_at.as_deref().unwrap_or_default(),
        )
    }
}

/// Blocking REST client authenticated with HTTP Basic credentials.
pub struct MailmanClient {
    agent: ureq::Agent,
    root_url: String,
    authorization: String,
}

impl MailmanClient {
    pub fn new(config: &ConnectionConfig) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            root_url: config.root_url.trim_end_matches('/').to_string(),
            authorization: basic_auth(&config.restuser, &config.restpass),
        }
    }

    fn lists_url(&self) -> String {
        format!("{}/lists", self.root_url)
    }

    fn list_url(&self, identifier: &str) -> String {
        format!("{}/lists/{}", self.root_url, identifier)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut response = self
            .agent
            .get(url)
            .header("Authorization", &self.authorization)
            .call()
            .with_context(|| format!("GET {url}"))?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("GET {url} returned status {}", status.as_u16()));
        }
        response
            .body_mut()
            .read_json()
            .with_context(|| format!("parse response from {url}"))
    }
}

impl ListDirectory for MailmanClient {
    #[instrument(skip_all, fields(root_url = %self.root_url))]
    fn lists(&self) -> Result<Vec<ListRecord>> {
        let page: ListPage = self.get_json(&self.lists_url())?;
        info!(count = page.entries.len(), "fetched mailing lists");
        page.entries
            .into_iter()
            .map(|entry| -> Result<ListRecord> {
                let settings: ListSettings = self.get_json(&config_url(&entry.self_link))?;
                debug!(list = %entry.fqdn_listname, last_post_at = ?settings.last_post_at, "fetched list settings");
                Ok(settings.into_record(&entry.fqdn_listname))
            })
            .collect()
    }

    #[instrument(skip(self))]
    fn delete(&self, identifier: &str) -> std::result::Result<(), RemoteError> {
        let url = self.list_url(identifier);
        let response = self
            .agent
            .delete(url.as_str())
            .header("Authorization", &self.authorization)
            .call()
            .map_err(|err| RemoteError::Connectivity(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Rejected {
                status: status.as_u16(),
            });
        }
        debug!("list deleted");
        Ok(())
    }
}

fn config_url(self_link: &str) -> String {
    format!("{}/config", self_link.trim_end_matches('/'))
}

fn basic_auth(user: &str, pass: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{pass}")))
}
