use crate::config::types::{ArchiveConfig, Config, PatternRule, RunConfig, StoreConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_run_config(&config.run)?;
    validate_store_config(&config.stores)?;
    validate_archive_config(&config.archive)?;
    validate_patterns(&config.pattern)?;
    Ok(())
}

/// Validates per-run behavior settings
fn validate_run_config(config: &RunConfig) -> Result<(), ConfigError> {
    if config.max_seeds_per_run < 1 {
        return Err(ConfigError::Validation(format!(
            "max_seeds_per_run must be >= 1, got {}",
            config.max_seeds_per_run
        )));
    }

    if config.worker_count < 1 || config.worker_count > 100 {
        return Err(ConfigError::Validation(format!(
            "worker_count must be between 1 and 100, got {}",
            config.worker_count
        )));
    }

    if config.request_delay_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "request_delay_ms must be >= 100ms, got {}ms",
            config.request_delay_ms
        )));
    }

    if config.fetch_timeout_secs < 1 || config.fetch_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be between 1 and 300, got {}",
            config.fetch_timeout_secs
        )));
    }

    Ok(())
}

/// Validates store file paths
fn validate_store_config(config: &StoreConfig) -> Result<(), ConfigError> {
    if config.frontier_path.is_empty() {
        return Err(ConfigError::Validation(
            "frontier_path cannot be empty".to_string(),
        ));
    }

    if config.output_path.is_empty() {
        return Err(ConfigError::Validation(
            "output_path cannot be empty".to_string(),
        ));
    }

    if config.frontier_path == config.output_path {
        return Err(ConfigError::Validation(
            "frontier_path and output_path must be different files".to_string(),
        ));
    }

    Ok(())
}

/// Validates archive endpoints
fn validate_archive_config(config: &ArchiveConfig) -> Result<(), ConfigError> {
    Url::parse(&config.availability_endpoint).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid availability_endpoint: {}", e))
    })?;

    Url::parse(&config.save_endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid save_endpoint: {}", e)))?;

    if config.save_timeout_secs < 1 {
        return Err(ConfigError::Validation(
            "save_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates scan pattern rules
///
/// A rule must carry an http(s) literal prefix, and `suffix`/`rewrite` only
/// make sense as a pair.
fn validate_patterns(patterns: &[PatternRule]) -> Result<(), ConfigError> {
    for rule in patterns {
        if rule.prefix.is_empty() {
            return Err(ConfigError::InvalidPattern(
                "pattern prefix cannot be empty".to_string(),
            ));
        }

        if !rule.prefix.starts_with("http") {
            return Err(ConfigError::InvalidPattern(format!(
                "pattern prefix must start with 'http', got '{}'",
                rule.prefix
            )));
        }

        match (&rule.suffix, &rule.rewrite) {
            (Some(suffix), Some(_)) if suffix.is_empty() => {
                return Err(ConfigError::InvalidPattern(
                    "pattern suffix cannot be empty".to_string(),
                ));
            }
            (Some(_), Some(_)) | (None, None) => {}
            _ => {
                return Err(ConfigError::InvalidPattern(format!(
                    "pattern '{}' must set suffix and rewrite together",
                    rule.prefix
                )));
            }
        }
    }

    Ok(())
}
