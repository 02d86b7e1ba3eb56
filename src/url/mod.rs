//! URL handling module for Link Auditor
//!
//! This module provides link normalization, host extraction, ignore-rule matching,
//! and link classification functionality.

mod domain;
mod matcher;
mod normalize;

use crate::model::LinkType;
use url::Url;

// Re-export main functions
pub use domain::{host_of, SiteHosts};
pub use matcher::IgnorePatterns;
pub use normalize::normalize_link;

/// File extensions that mark a URL as an asset regardless of its host
const ASSET_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "svg", "pdf", "doc", "docx", "xls", "xlsx", "ppt",
    "pptx",
];

/// Classifies an absolute URL relative to the corpus
///
/// This function checks the URL in the following priority order:
/// 1. Asset extension on the last path segment
/// 2. Internal host (see [`is_internal`])
/// 3. External (default)
///
/// # Examples
///
/// ```
/// use link_auditor::model::LinkType;
/// use link_auditor::url::{classify_url, SiteHosts};
///
/// let hosts = SiteHosts::from_base_urls(["https://example.com/"]);
/// assert_eq!(classify_url("https://example.com/files/report.PDF", &hosts), LinkType::Asset);
/// assert_eq!(classify_url("https://example.com/about", &hosts), LinkType::Internal);
/// assert_eq!(classify_url("https://other.org/", &hosts), LinkType::External);
/// ```
pub fn classify_url(url: &str, hosts: &SiteHosts) -> LinkType {
    if has_asset_extension(url) {
        return LinkType::Asset;
    }

    if is_internal(url, hosts) {
        LinkType::Internal
    } else {
        LinkType::External
    }
}

/// Returns true if the URL points at one of the corpus' own hosts
///
/// Root-relative paths and URLs without a resolvable host count as internal.
pub fn is_internal(url: &str, hosts: &SiteHosts) -> bool {
    if url.starts_with('/') && !url.starts_with("//") {
        return true;
    }

    let host = if url.starts_with("//") {
        host_of(&format!("https:{}", url))
    } else {
        host_of(url)
    };

    match host {
        Ok(host) => hosts.contains(&host),
        Err(_) => true,
    }
}

/// Checks the extension of the URL path's last segment
fn has_asset_extension(url: &str) -> bool {
    let path = match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Relative references: drop query and fragment by hand
        Err(_) => url.split(['?', '#']).next().unwrap_or("").to_string(),
    };

    let last_segment = path.rsplit('/').next().unwrap_or("");
    match last_segment.rsplit_once('.') {
        Some((_, ext)) => ASSET_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()),
        None => false,
    }
}
