//! Content pages and their scan results
//!
//! Pages come from the content source; the engine only reads them.

use crate::model::{FieldValue, LinkRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Publication status of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    /// Published and reachable at its URL
    Live,
    /// Scheduled for a future publication date
    Pending,
    /// Past its expiry date
    Expired,
    /// Turned off by an editor
    Disabled,
    /// Unpublished draft
    Draft,
}

impl PageStatus {
    /// Returns true if the page's rendered HTML can be fetched from its URL
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Pending => "pending",
            Self::Expired => "expired",
            Self::Disabled => "disabled",
            Self::Draft => "draft",
        }
    }

    /// Parses a status string (case-insensitive)
    ///
    /// Returns None if the string doesn't match any known status.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Some(Self::Live),
            "pending" => Some(Self::Pending),
            "expired" => Some(Self::Expired),
            "disabled" => Some(Self::Disabled),
            "draft" => Some(Self::Draft),
            _ => None,
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A content item to scan
#[derive(Debug, Clone)]
pub struct Page {
    /// Opaque identifier, copied onto every link found on the page
    pub id: String,
    pub title: String,
    /// Canonical absolute URL of the page
    pub url: String,
    pub status: PageStatus,
    pub site_label: String,
    /// Where an editor fixes the page
    pub edit_url: Option<String>,
    pub section: Option<String>,
    pub entry_type: Option<String>,
    /// Structured field values, scanned when the page is not live
    pub fields: FieldValue,
}

impl Page {
    pub fn is_live(&self) -> bool {
        self.status.is_live()
    }

    /// Page metadata echoed into scan results
    pub fn meta(&self) -> PageMeta {
        PageMeta {
            title: self.title.clone(),
            url: self.url.clone(),
            site_label: self.site_label.clone(),
            edit_url: self.edit_url.clone(),
        }
    }
}

/// Page metadata carried by a [`PageResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub title: String,
    pub url: String,
    pub site_label: String,
    pub edit_url: Option<String>,
}

impl PageMeta {
    /// Label used when a link is reported out of its page context
    pub fn display_name(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

/// One scanned page with its verified links in discovery order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    pub page: PageMeta,
    pub links: Vec<LinkRecord>,
}

impl PageResult {
    /// Number of links on this page that failed verification
    pub fn broken_count(&self) -> usize {
        self.links.iter().filter(|link| !link.ok).count()
    }
}
