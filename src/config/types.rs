use crate::scan::ScanOptions;
use serde::Deserialize;

/// Main configuration structure for Link Auditor
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
    #[serde(default)]
    pub scan: ScanOptions,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default, rename = "site")]
    pub sites: Vec<SiteEntry>,
}

/// HTTP client configuration shared by every request of a scan
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Total per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP/TLS connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Maximum number of redirect hops followed per URL
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_timeout_secs(),
            max_redirects: default_max_redirects(),
        }
    }
}

/// Scan status/result persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,

    /// How long stored status and results stay readable (seconds)
    #[serde(rename = "ttl-secs", default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// A site (or locale) of the corpus; its host marks links as internal
#[derive(Debug, Clone, Deserialize)]
pub struct SiteEntry {
    /// Human-readable site name, matched by page filters
    pub label: String,

    /// Base URL the site is served from (e.g., "https://example.com/")
    #[serde(rename = "base-url")]
    pub base_url: String,
}

fn default_user_agent() -> String {
    "LinkAuditor/1.0".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_max_redirects() -> usize {
    5
}

fn default_database_path() -> String {
    "./link-auditor.db".to_string()
}

fn default_ttl_secs() -> u64 {
    3600
}
