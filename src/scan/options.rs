//! Scan options

use crate::model::LinkType;
use crate::url::IgnorePatterns;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest accepted verification concurrency
pub const MIN_CONCURRENCY: usize = 1;

/// Highest accepted verification concurrency
pub const MAX_CONCURRENCY: usize = 50;

/// Clamps a requested concurrency into `[MIN_CONCURRENCY, MAX_CONCURRENCY]`
pub fn clamp_concurrency(requested: usize) -> usize {
    requested.clamp(MIN_CONCURRENCY, MAX_CONCURRENCY)
}

/// Which classes of links a scan keeps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// Only links to the corpus' own hosts
    Internal,
    /// Only links to other hosts
    External,
    /// Everything
    #[default]
    Both,
}

impl LinkMode {
    /// Returns true if a link of this type survives the mode filter
    ///
    /// Assets pass every mode; whether they are collected at all is decided by
    /// `check-assets`.
    pub fn admits(&self, link_type: LinkType) -> bool {
        match (self, link_type) {
            (Self::Internal, LinkType::External) => false,
            (Self::External, LinkType::Internal) => false,
            _ => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
            Self::Both => "both",
        }
    }

    /// Parses a mode string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "internal" => Some(Self::Internal),
            "external" => Some(Self::External),
            "both" | "all" => Some(Self::Both),
            _ => None,
        }
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options of one scan; immutable once the scan starts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOptions {
    #[serde(rename = "link-mode", default)]
    pub link_mode: LinkMode,

    /// Verify the page's own URL (live pages only)
    #[serde(rename = "check-entry-urls", default = "default_true")]
    pub check_entry_urls: bool,

    /// Extract and verify links inside the page
    #[serde(rename = "check-content-links", default = "default_true")]
    pub check_content_links: bool,

    /// Keep image and document links
    #[serde(rename = "check-assets", default)]
    pub check_assets: bool,

    /// URLs containing any of these substrings are skipped (case-insensitive)
    #[serde(rename = "ignore-patterns", default)]
    pub ignore_patterns: Vec<String>,

    /// Maximum number of verification requests in flight
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl ScanOptions {
    /// Concurrency actually used by the verification pool
    pub fn effective_concurrency(&self) -> usize {
        clamp_concurrency(self.concurrency)
    }

    pub fn ignore_rules(&self) -> IgnorePatterns {
        IgnorePatterns::new(&self.ignore_patterns)
    }
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            link_mode: LinkMode::default(),
            check_entry_urls: true,
            check_content_links: true,
            check_assets: false,
            ignore_patterns: Vec::new(),
            concurrency: default_concurrency(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    10
}
