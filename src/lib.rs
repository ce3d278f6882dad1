//! Kioku: a polite web preservation runner
//!
//! This crate discovers URLs reachable from a set of seed pages, checks which
//! of them lack a public Wayback Machine snapshot, and either submits the
//! missing ones for capture or records them for a later submission pass.
//! Progress is persisted in plain-text frontier and output files so runs are
//! resumable and idempotent.

pub mod archive;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod github;
pub mod pipeline;
pub mod store;

use thiserror::Error;

/// Main error type for Kioku operations
#[derive(Debug, Error)]
pub enum KiokuError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected API payload from {url}: {message}")]
    Api { url: String, message: String },

    #[error("Archive rate limit exceeded while submitting {url}")]
    RateLimitExceeded { url: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Worker pool error: {0}")]
    Worker(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid scan pattern: {0}")]
    InvalidPattern(String),
}

/// Result type alias for Kioku operations
pub type Result<T> = std::result::Result<T, KiokuError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::{Coordinator, RunMode, RunSummary};
