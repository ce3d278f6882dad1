//! Snapshot availability lookups
//!
//! One GET against the availability endpoint per URL. The response carries an
//! `archived_snapshots` object; an empty object means no snapshot exists.
//! Any failure resolves to the conservative answer (treat as not archived,
//! keep the URL in play) with the error kept for the run summary.

use crate::fetch::random_user_agent;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;

/// Answer from the availability endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotStatus {
    /// At least one snapshot exists
    Archived,

    /// No snapshot exists
    NotArchived,

    /// The lookup itself failed; treated as not archived downstream
    CheckFailed(String),
}

impl SnapshotStatus {
    /// Whether the URL should still be considered for preservation
    ///
    /// A failed check counts as needing archive.
    pub fn needs_archive(&self) -> bool {
        !matches!(self, SnapshotStatus::Archived)
    }
}

/// Availability endpoint response shape
#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    archived_snapshots: serde_json::Map<String, serde_json::Value>,
}

/// Asks the availability endpoint whether a URL has a snapshot
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `endpoint` - Availability endpoint base (no query string)
/// * `url` - The URL to look up
pub async fn check_archived(client: &Client, endpoint: &str, url: &str) -> SnapshotStatus {
    let response = client
        .get(endpoint)
        .query(&[("url", url)])
        .header(USER_AGENT, random_user_agent())
        .send()
        .await;

    let response = match response {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("Availability lookup failed for {}: {}", url, e);
            return SnapshotStatus::CheckFailed(e.to_string());
        }
    };

    match response.json::<AvailabilityResponse>().await {
        Ok(body) if body.archived_snapshots.is_empty() => SnapshotStatus::NotArchived,
        Ok(_) => SnapshotStatus::Archived,
        Err(e) => {
            tracing::debug!("Availability payload unreadable for {}: {}", url, e);
            SnapshotStatus::CheckFailed(e.to_string())
        }
    }
}
