//! Capture submission with bounded retry and 429 backoff
//!
//! Submission is a single GET to the save endpoint, retried in an explicit
//! loop carrying two counters:
//! - a retry counter for plain failures (non-200 status, transport error),
//!   capped at [`MAX_ATTEMPTS`] attempts total, then the URL is given up on
//! - a rate-limit counter for HTTP 429, capped at [`RATE_LIMIT_CEILING`];
//!   exceeding it is fatal to the whole run, not just this URL
//!
//! A 429 does not consume a retry attempt; the two counters are independent.

use crate::config::ArchiveConfig;
use crate::fetch::random_user_agent;
use crate::{KiokuError, Result};
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Total attempts before a URL is reported as failed
const MAX_ATTEMPTS: u32 = 3;

/// Consecutive 429 responses tolerated for one URL before the run halts
const RATE_LIMIT_CEILING: u32 = 3;

/// Submission pacing and endpoint
#[derive(Debug, Clone)]
pub struct SubmitterConfig {
    /// Save endpoint; the URL to capture is appended to the path
    pub endpoint: String,

    /// Sleep after a 429 before re-attempting
    pub cooldown: Duration,

    /// Sleep after a plain failure before re-attempting
    pub retry_delay: Duration,

    /// Per-request timeout; captures are slow
    pub request_timeout: Duration,
}

impl SubmitterConfig {
    /// Builds the submitter settings from the archive configuration section
    pub fn from_config(config: &ArchiveConfig) -> Self {
        Self {
            endpoint: config.save_endpoint.clone(),
            cooldown: Duration::from_millis(config.cooldown_ms),
            retry_delay: Duration::from_millis(config.retry_delay_ms),
            request_timeout: Duration::from_secs(config.save_timeout_secs),
        }
    }
}

/// Terminal result of submitting one URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The archive accepted the capture (HTTP 200)
    Archived,

    /// All attempts exhausted; the URL stays unarchived this run
    Failed,
}

/// Requests a capture of one URL
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `config` - Endpoint and pacing
/// * `url` - The URL to preserve
///
/// # Returns
///
/// * `Ok(SubmitOutcome)` - Terminal per-URL result
/// * `Err(KiokuError::RateLimitExceeded)` - Sustained throttling; the caller
///   must halt the run
pub async fn submit_url(
    client: &Client,
    config: &SubmitterConfig,
    url: &str,
) -> Result<SubmitOutcome> {
    let target = format!("{}/{}", config.endpoint.trim_end_matches('/'), url);

    let mut attempts: u32 = 0;
    let mut rate_limited: u32 = 0;

    loop {
        // Fresh identity on every attempt
        let response = client
            .get(&target)
            .header(USER_AGENT, random_user_agent())
            .timeout(config.request_timeout)
            .send()
            .await;

        match response {
            Ok(response) if response.status() == StatusCode::TOO_MANY_REQUESTS => {
                rate_limited += 1;
                if rate_limited > RATE_LIMIT_CEILING {
                    tracing::error!(
                        "Rate limited {} times submitting {}, halting run",
                        rate_limited,
                        url
                    );
                    return Err(KiokuError::RateLimitExceeded {
                        url: url.to_string(),
                    });
                }

                tracing::warn!(
                    "Rate limited submitting {} ({}/{}), cooling down for {:?}",
                    url,
                    rate_limited,
                    RATE_LIMIT_CEILING,
                    config.cooldown
                );
                tokio::time::sleep(config.cooldown).await;
            }

            Ok(response) if response.status() == StatusCode::OK => {
                tracing::info!("Successfully archived: {}", url);
                return Ok(SubmitOutcome::Archived);
            }

            Ok(response) => {
                attempts += 1;
                if attempts >= MAX_ATTEMPTS {
                    tracing::warn!(
                        "Failed to archive {}: status {} after {} attempts",
                        url,
                        response.status(),
                        attempts
                    );
                    return Ok(SubmitOutcome::Failed);
                }

                tracing::debug!(
                    "Submission of {} got status {}, retrying in {:?}",
                    url,
                    response.status(),
                    config.retry_delay
                );
                tokio::time::sleep(config.retry_delay).await;
            }

            Err(e) => {
                attempts += 1;
                if attempts >= MAX_ATTEMPTS {
                    tracing::warn!(
                        "Failed to archive {} after {} attempts: {}",
                        url,
                        attempts,
                        e
                    );
                    return Ok(SubmitOutcome::Failed);
                }

                tracing::debug!(
                    "Submission of {} failed ({}), retrying in {:?}",
                    url,
                    e,
                    config.retry_delay
                );
                tokio::time::sleep(config.retry_delay).await;
            }
        }
    }
}
