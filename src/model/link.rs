//! Link records and their verification metadata

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification of a link relative to the corpus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// Points at one of the corpus' own sites
    Internal,
    /// Points anywhere else
    External,
    /// Image or document, regardless of host
    Asset,
}

impl LinkType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "internal",
            Self::External => "external",
            Self::Asset => "asset",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Redirect chain observed while verifying a URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectInfo {
    pub has_redirects: bool,
    pub redirect_count: usize,
    /// Status code of every redirect response, in order
    pub status_codes: Vec<u16>,
    /// Target of every redirect hop, in order
    pub urls: Vec<String>,
    pub final_url: String,
}

impl RedirectInfo {
    /// No redirection: the final URL is the requested one
    pub fn none(url: &str) -> Self {
        Self {
            has_redirects: false,
            redirect_count: 0,
            status_codes: Vec::new(),
            urls: Vec::new(),
            final_url: url.to_string(),
        }
    }

    /// Builds redirect metadata from the hops taken starting at `original_url`
    pub fn from_chain(original_url: &str, status_codes: Vec<u16>, urls: Vec<String>) -> Self {
        let final_url = urls
            .last()
            .cloned()
            .unwrap_or_else(|| original_url.to_string());

        Self {
            has_redirects: !status_codes.is_empty(),
            redirect_count: status_codes.len(),
            status_codes,
            urls,
            final_url,
        }
    }
}

/// One discovered link on one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub source_entity_id: String,
    pub url: String,
    pub link_type: LinkType,
    pub status_code: Option<u16>,
    pub ok: bool,
    pub message: String,
    pub redirect_info: RedirectInfo,
}

impl LinkRecord {
    /// Creates an unverified record
    pub fn pending(source_entity_id: &str, url: &str, link_type: LinkType) -> Self {
        Self {
            source_entity_id: source_entity_id.to_string(),
            url: url.to_string(),
            link_type,
            status_code: None,
            ok: false,
            message: String::new(),
            redirect_info: RedirectInfo::none(url),
        }
    }

    /// Returns true once an outcome (or a missing-outcome marker) has been merged in
    pub fn is_verified(&self) -> bool {
        self.status_code.is_some() || !self.message.is_empty()
    }

    /// Marks the record as having received no verification outcome
    ///
    /// Keeps any message already present; other fields are left untouched.
    pub fn mark_no_response(&mut self) {
        self.status_code = None;
        self.ok = false;
        if self.message.is_empty() {
            self.message = "No response".to_string();
        }
    }
}
