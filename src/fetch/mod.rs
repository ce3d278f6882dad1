//! HTTP fetching
//!
//! This module owns the shared HTTP client and the two request shapes the
//! pipeline needs from ordinary sites:
//! - GET a page body for extraction
//! - HEAD a URL to see whether it still resolves to something other than 404
//!
//! Archive endpoints have their own request logic in [`crate::archive`].

mod identity;

pub use identity::random_user_agent;

use crate::KiokuError;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

/// Builds the shared HTTP client
///
/// No default User-Agent is set on the client; every request attaches a
/// freshly randomized identity instead. Redirects follow reqwest's default
/// policy (up to 10 hops), matching what ordinary page fetches need.
///
/// # Arguments
///
/// * `timeout` - Default timeout applied to every request unless overridden
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body text
///
/// Used for seed pages. The caller decides what a failure means; during
/// discovery a fetch error yields an empty extraction set rather than
/// aborting the seed.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - The response body
/// * `Err(KiokuError)` - Transport failure, typed with the offending URL
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, KiokuError> {
    let response = client
        .get(url)
        .header(USER_AGENT, random_user_agent())
        .send()
        .await
        .map_err(|source| KiokuError::Http {
            url: url.to_string(),
            source,
        })?;

    response.text().await.map_err(|source| KiokuError::Http {
        url: url.to_string(),
        source,
    })
}

/// Checks whether a URL still resolves to a live resource
///
/// Issues a HEAD request and treats anything except HTTP 404 as alive.
/// Network failures count as not alive.
pub async fn is_alive(client: &Client, url: &str) -> bool {
    let result = client
        .head(url)
        .header(USER_AGENT, random_user_agent())
        .timeout(Duration::from_secs(10))
        .send()
        .await;

    match result {
        Ok(response) => response.status() != reqwest::StatusCode::NOT_FOUND,
        Err(e) => {
            tracing::debug!("Liveness check failed for {}: {}", url, e);
            false
        }
    }
}
