//! Per-seed discovery
//!
//! One worker invocation handles one seed end to end: fetch the page,
//! extract outbound URLs, expand GitHub repository roots, then filter the
//! whole set against the archive status oracle. The record pipeline
//! additionally drops URLs that no longer resolve.

use crate::archive::check_archived;
use crate::config::Config;
use crate::extract::extract_urls;
use crate::fetch::{fetch_html, is_alive};
use crate::github::GithubExpander;
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

/// Everything one seed contributed to the run
#[derive(Debug)]
pub struct DiscoveryOutcome {
    /// The seed this outcome belongs to
    pub seed: String,

    /// URLs reachable from the seed (seed included) with no known snapshot
    pub needs_archive: HashSet<String>,

    /// Total URLs derived from the seed, seed included
    pub discovered: usize,

    /// URLs that already have a snapshot
    pub already_archived: usize,

    /// Error strings from failed status lookups, kept for the run summary
    pub status_errors: Vec<String>,
}

/// Processes a single seed: fetch → extract → expand → filter
///
/// Fetch and parse failures are absorbed: a seed whose page cannot be read
/// still yields itself as a candidate, so an unreachable page can at least
/// be checked against the archive.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `config` - Run configuration (scan rules, endpoints)
/// * `github` - Repository expander
/// * `seed` - The seed URL
/// * `check_liveness` - Drop URLs that resolve to 404 (record pipeline only)
pub async fn discover_seed(
    client: &Client,
    config: &Config,
    github: &GithubExpander,
    seed: &str,
    check_liveness: bool,
) -> DiscoveryOutcome {
    let mut urls = fetch_and_extract(client, config, seed).await;
    urls.insert(seed.to_string());

    // Expand every repository root found among the candidates
    let roots: Vec<(String, String, String)> = urls
        .iter()
        .filter_map(|url| {
            GithubExpander::repo_root(url).map(|(owner, repo)| (url.clone(), owner, repo))
        })
        .collect();

    for (repo_url, owner, repo) in roots {
        let expanded = github.expand(&repo_url, &owner, &repo).await;
        tracing::debug!(
            "Expanded {} into {} candidate URLs",
            repo_url,
            expanded.len()
        );
        urls.extend(expanded);
    }

    let discovered = urls.len();
    tracing::info!("Found {} URLs in {}", discovered, seed);

    // Filter against the archive, and optionally against liveness
    let mut needs_archive = HashSet::new();
    let mut already_archived = 0;
    let mut status_errors = Vec::new();

    for url in urls {
        let status = check_archived(client, &config.archive.availability_endpoint, &url).await;

        if let crate::archive::SnapshotStatus::CheckFailed(error) = &status {
            status_errors.push(error.clone());
        }

        if !status.needs_archive() {
            already_archived += 1;
            tracing::debug!("Already archived: {}", url);
            continue;
        }

        if check_liveness && !is_alive(client, &url).await {
            tracing::debug!("Dropping dead URL: {}", url);
            continue;
        }

        needs_archive.insert(url);
    }

    DiscoveryOutcome {
        seed: seed.to_string(),
        needs_archive,
        discovered,
        already_archived,
        status_errors,
    }
}

/// Fetches the seed page and extracts its outbound URLs
///
/// Any failure here yields an empty set rather than an error; the seed is
/// still worth checking on its own.
async fn fetch_and_extract(client: &Client, config: &Config, seed: &str) -> HashSet<String> {
    let base_url = match Url::parse(seed) {
        Ok(base_url) => base_url,
        Err(e) => {
            tracing::warn!("Seed {} is not a valid URL: {}", seed, e);
            return HashSet::new();
        }
    };

    match fetch_html(client, seed).await {
        Ok(body) => extract_urls(&body, &base_url, &config.pattern),
        Err(e) => {
            tracing::warn!("Error fetching {}: {}", seed, e);
            HashSet::new()
        }
    }
}
