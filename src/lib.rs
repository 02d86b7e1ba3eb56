//! Link Auditor: broken link and asset detection for content corpora
//!
//! This crate discovers the hyperlinks a set of content pages reference, both in their
//! rendered HTML and inside structured content fields, and verifies every discovered URL
//! over HTTP with bounded concurrency, recording status codes, failure categories and
//! redirect chains.

pub mod config;
pub mod extract;
pub mod model;
pub mod output;
pub mod scan;
pub mod source;
pub mod storage;
pub mod url;
pub mod verify;

use thiserror::Error;

/// Main error type for Link Auditor operations
///
/// Link discovery and verification never produce errors: failures there are recorded on
/// the affected link. These variants cover the surrounding layers only.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Content source error: {0}")]
    Source(#[from] SourceError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Errors raised while enumerating pages from a content source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read page manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse page manifest: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid page entry: {0}")]
    InvalidPage(String),
}

/// Result type alias for Link Auditor operations
pub type Result<T> = std::result::Result<T, AuditError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{FieldValue, LinkRecord, LinkType, Page, PageResult, PageStatus, RedirectInfo};
pub use scan::{build_link_set, LinkMode, ScanOptions, ScanResults, Scanner};
pub use url::{classify_url, is_internal, normalize_link, SiteHosts};
pub use verify::{check_urls_concurrently, LinkOutcome, Verifier};
