use crate::config::types::{ClientConfig, Config, SiteEntry, StorageConfig};
use crate::scan::{ScanOptions, MAX_CONCURRENCY, MIN_CONCURRENCY};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Upper bound for `max-redirects`; redirect chains longer than this are never useful
const MAX_REDIRECT_LIMIT: usize = 20;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_client_config(&config.client)?;
    validate_scan_options(&config.scan)?;
    validate_storage_config(&config.storage)?;
    validate_sites(&config.sites)?;
    Ok(())
}

/// Validates HTTP client configuration
fn validate_client_config(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    if config.max_redirects > MAX_REDIRECT_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max-redirects must be <= {}, got {}",
            MAX_REDIRECT_LIMIT, config.max_redirects
        )));
    }

    Ok(())
}

/// Validates default scan options
///
/// Options handed to a scan at runtime are clamped instead; a config file asking for an
/// out-of-range value is a mistake worth reporting.
fn validate_scan_options(options: &ScanOptions) -> Result<(), ConfigError> {
    if options.concurrency < MIN_CONCURRENCY || options.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between {} and {}, got {}",
            MIN_CONCURRENCY, MAX_CONCURRENCY, options.concurrency
        )));
    }

    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    if config.ttl_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "ttl-secs must be >= 1, got {}",
            config.ttl_secs
        )));
    }

    Ok(())
}

/// Validates site entries
fn validate_sites(sites: &[SiteEntry]) -> Result<(), ConfigError> {
    if sites.is_empty() {
        return Err(ConfigError::Validation(
            "at least one [[site]] entry is required".to_string(),
        ));
    }

    let mut labels = HashSet::new();
    for site in sites {
        let label = site.label.trim();
        if label.is_empty() {
            return Err(ConfigError::Validation(
                "site label cannot be empty".to_string(),
            ));
        }

        if !labels.insert(label.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate site label '{}'",
                label
            )));
        }

        validate_base_url(&site.base_url)?;
    }

    Ok(())
}

/// Validates a site base URL: http(s) with a host
fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' has no host",
            base_url
        )));
    }

    Ok(())
}
