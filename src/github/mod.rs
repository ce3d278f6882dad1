//! GitHub repository URL expansion
//!
//! A link to a repository root is a poor preservation target on its own; the
//! artifacts worth capturing hang off it. For each repo-root URL the expander
//! derives:
//! - two branch-archive zip guesses (always)
//! - every release asset, issue, and pull request URL, via three independent
//!   authenticated API calls (only when a credential is configured)
//!
//! Each API call fails independently. A network error, a non-2xx status, or a
//! payload that is not a JSON list is logged and skipped without affecting
//! the other calls or the zip guesses.

use crate::fetch::random_user_agent;
use crate::{KiokuError, Result};
use reqwest::header::{AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde_json::Value;
use url::Url;

/// Host recognized as the GitHub web frontend
const GITHUB_HOST: &str = "github.com";

/// Expands GitHub repository roots into candidate artifact URLs
pub struct GithubExpander {
    client: Client,
    api_base: String,
    token: Option<String>,
}

impl GithubExpander {
    /// Creates an expander
    ///
    /// # Arguments
    ///
    /// * `client` - The shared HTTP client
    /// * `api_base` - REST API base URL (overridable for tests)
    /// * `token` - Optional API credential; without it only zip guesses are produced
    pub fn new(client: Client, api_base: String, token: Option<String>) -> Self {
        Self {
            client,
            api_base,
            token,
        }
    }

    /// Classifies a URL as a GitHub repository root
    ///
    /// A repository root has host `github.com` and a path of exactly
    /// `/{owner}/{repo}`, both segments non-empty. Trailing slashes and
    /// deeper paths do not qualify.
    ///
    /// # Returns
    ///
    /// * `Some((owner, repo))` - The URL is a repository root
    /// * `None` - Anything else, including unparseable URLs
    pub fn repo_root(url: &str) -> Option<(String, String)> {
        let parsed = Url::parse(url).ok()?;

        if parsed.host_str() != Some(GITHUB_HOST) {
            return None;
        }

        let segments: Vec<&str> = parsed.path_segments()?.collect();
        match segments.as_slice() {
            [owner, repo] if !owner.is_empty() && !repo.is_empty() => {
                Some((owner.to_string(), repo.to_string()))
            }
            _ => None,
        }
    }

    /// Derives candidate artifact URLs for a repository
    ///
    /// The two zip guesses are always present. With a credential, releases,
    /// issues, and pull requests are appended; each of the three lookups is
    /// independently best-effort.
    ///
    /// # Arguments
    ///
    /// * `repo_url` - The repository root URL as discovered
    /// * `owner` - Repository owner from [`Self::repo_root`]
    /// * `repo` - Repository name from [`Self::repo_root`]
    pub async fn expand(&self, repo_url: &str, owner: &str, repo: &str) -> Vec<String> {
        let mut urls = vec![
            format!("{}/archive/refs/heads/main.zip", repo_url),
            format!(
                "https://codeload.github.com/{}/{}/zip/refs/heads/main",
                owner, repo
            ),
        ];

        let token = match &self.token {
            Some(token) => token,
            None => {
                tracing::debug!(
                    "Skipping GitHub API expansion for {}/{} (no credential)",
                    owner,
                    repo
                );
                return urls;
            }
        };

        match self.list(token, owner, repo, "releases").await {
            Ok(releases) => {
                for release in &releases {
                    if let Some(assets) = release.get("assets").and_then(Value::as_array) {
                        for asset in assets {
                            if let Some(download) =
                                asset.get("browser_download_url").and_then(Value::as_str)
                            {
                                urls.push(download.to_string());
                            }
                        }
                    }
                }
            }
            Err(e) => tracing::warn!("Failed to fetch releases for {}/{}: {}", owner, repo, e),
        }

        match self.list(token, owner, repo, "issues").await {
            Ok(issues) => {
                urls.extend(collect_html_urls(&issues));
            }
            Err(e) => tracing::warn!("Failed to fetch issues for {}/{}: {}", owner, repo, e),
        }

        match self.list(token, owner, repo, "pulls").await {
            Ok(pulls) => {
                urls.extend(collect_html_urls(&pulls));
            }
            Err(e) => tracing::warn!("Failed to fetch pulls for {}/{}: {}", owner, repo, e),
        }

        urls
    }

    /// Fetches one repository listing endpoint as a JSON array
    async fn list(&self, token: &str, owner: &str, repo: &str, kind: &str) -> Result<Vec<Value>> {
        let api_url = format!("{}/repos/{}/{}/{}", self.api_base, owner, repo, kind);

        let response = self
            .client
            .get(&api_url)
            .header(AUTHORIZATION, format!("token {}", token))
            .header(USER_AGENT, random_user_agent())
            .send()
            .await
            .map_err(|source| KiokuError::Http {
                url: api_url.clone(),
                source,
            })?
            .error_for_status()
            .map_err(|source| KiokuError::Http {
                url: api_url.clone(),
                source,
            })?;

        let payload: Value = response.json().await.map_err(|source| KiokuError::Http {
            url: api_url.clone(),
            source,
        })?;

        match payload {
            Value::Array(items) => Ok(items),
            other => Err(KiokuError::Api {
                url: api_url,
                message: format!("expected a list, got {}", type_name(&other)),
            }),
        }
    }
}

/// Pulls the `html_url` field out of each item in an API listing
fn collect_html_urls(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.get("html_url").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
