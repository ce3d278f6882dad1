use serde::Deserialize;

/// Main configuration structure for Kioku
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub run: RunConfig,
    pub stores: StoreConfig,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub pattern: Vec<PatternRule>,
}

/// Per-run behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Maximum number of frontier seeds sampled per run
    #[serde(rename = "max-seeds-per-run")]
    pub max_seeds_per_run: u32,

    /// Size of the discovery worker pool
    #[serde(rename = "worker-count")]
    pub worker_count: u32,

    /// Polite delay between archive submissions (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Timeout for page fetches and status checks (seconds)
    #[serde(rename = "fetch-timeout-secs")]
    pub fetch_timeout_secs: u64,
}

/// Locations of the two persisted URL sets
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the frontier file (pending seed URLs, one per line)
    #[serde(rename = "frontier-path")]
    pub frontier_path: String,

    /// Path to the output file (URLs needing archival, one per line)
    #[serde(rename = "output-path")]
    pub output_path: String,
}

/// Wayback Machine endpoints and submission pacing
///
/// The defaults are the public endpoints and the pacing the capture service
/// tolerates. Overrides exist for tests and self-hosted mirrors.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchiveConfig {
    /// Snapshot availability lookup endpoint
    #[serde(
        rename = "availability-endpoint",
        default = "default_availability_endpoint"
    )]
    pub availability_endpoint: String,

    /// Capture submission endpoint (URL to save is appended to the path)
    #[serde(rename = "save-endpoint", default = "default_save_endpoint")]
    pub save_endpoint: String,

    /// Cooldown after an HTTP 429 from the save endpoint (milliseconds)
    #[serde(rename = "cooldown-ms", default = "default_cooldown_ms")]
    pub cooldown_ms: u64,

    /// Delay before re-attempting a failed submission (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Timeout for a single capture request (seconds); captures are slow
    #[serde(rename = "save-timeout-secs", default = "default_save_timeout_secs")]
    pub save_timeout_secs: u64,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            availability_endpoint: default_availability_endpoint(),
            save_endpoint: default_save_endpoint(),
            cooldown_ms: default_cooldown_ms(),
            retry_delay_ms: default_retry_delay_ms(),
            save_timeout_secs: default_save_timeout_secs(),
        }
    }
}

fn default_availability_endpoint() -> String {
    "http://archive.org/wayback/available".to_string()
}

fn default_save_endpoint() -> String {
    "https://web.archive.org/save".to_string()
}

fn default_cooldown_ms() -> u64 {
    300_000
}

fn default_retry_delay_ms() -> u64 {
    5_000
}

fn default_save_timeout_secs() -> u64 {
    120
}

/// GitHub repository expansion settings
#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
    /// Environment variable holding the API credential
    #[serde(rename = "token-env", default = "default_token_env")]
    pub token_env: String,

    /// REST API base URL
    #[serde(rename = "api-base", default = "default_api_base")]
    pub api_base: String,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
            api_base: default_api_base(),
        }
    }
}

fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

/// A literal-prefix scan rule applied to raw HTML
///
/// When `suffix` and `rewrite` are both set, a matched candidate ending with
/// `suffix` is recorded with the suffix replaced by `rewrite` instead of in
/// its original form.
#[derive(Debug, Clone, Deserialize)]
pub struct PatternRule {
    /// Literal URL prefix to scan for
    pub prefix: String,

    /// Suffix marker that triggers a rewrite (e.g. "/legacy")
    #[serde(default)]
    pub suffix: Option<String>,

    /// Replacement for the suffix marker (e.g. "/webp")
    #[serde(default)]
    pub rewrite: Option<String>,
}
