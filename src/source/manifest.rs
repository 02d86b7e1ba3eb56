//! TOML page manifest content source
//!
//! A manifest lists the corpus as `[[page]]` tables:
//!
//! ```toml
//! [[page]]
//! id = "101"
//! title = "Home"
//! url = "https://example.com/"
//! status = "live"
//! site = "Default"
//! edit-url = "https://example.com/admin/entries/101"
//! section = "pages"
//! entry-type = "page"
//!
//! [page.fields]
//! body = "See https://other.org/"
//! ```

use crate::model::{FieldValue, Page, PageStatus};
use crate::source::{ContentSource, PageFilter};
use crate::SourceError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ManifestFile {
    #[serde(default, rename = "page")]
    pages: Vec<ManifestPage>,
}

#[derive(Debug, Deserialize)]
struct ManifestPage {
    id: String,
    #[serde(default)]
    title: String,
    url: Option<String>,
    #[serde(default = "default_status")]
    status: String,
    #[serde(default = "default_site")]
    site: String,
    #[serde(rename = "edit-url")]
    edit_url: Option<String>,
    section: Option<String>,
    #[serde(rename = "entry-type")]
    entry_type: Option<String>,
    #[serde(default)]
    fields: FieldValue,
}

fn default_status() -> String {
    "live".to_string()
}

fn default_site() -> String {
    "Default".to_string()
}

/// Content source backed by a TOML manifest
#[derive(Debug, Clone, Default)]
pub struct ManifestSource {
    pages: Vec<Page>,
}

impl ManifestSource {
    /// Loads a manifest file
    pub fn load(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses manifest text
    ///
    /// Pages without a URL are dropped. Unknown statuses are an error.
    pub fn parse(content: &str) -> Result<Self, SourceError> {
        let file: ManifestFile = toml::from_str(content)?;
        let mut pages = Vec::with_capacity(file.pages.len());

        for entry in file.pages {
            let status = PageStatus::parse(&entry.status).ok_or_else(|| {
                SourceError::InvalidPage(format!(
                    "page {} has unknown status '{}'",
                    entry.id, entry.status
                ))
            })?;

            let url = match entry.url {
                Some(url) if !url.trim().is_empty() => url.trim().to_string(),
                _ => {
                    tracing::debug!("Skipping page {} without URL", entry.id);
                    continue;
                }
            };

            pages.push(Page {
                id: entry.id,
                title: entry.title,
                url,
                status,
                site_label: entry.site,
                edit_url: entry.edit_url,
                section: entry.section,
                entry_type: entry.entry_type,
                fields: entry.fields,
            });
        }

        Ok(Self { pages })
    }

    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Number of pages with a URL in the manifest
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl ContentSource for ManifestSource {
    fn list_scannable_pages(&self, filter: &PageFilter) -> Result<Vec<Page>, SourceError> {
        Ok(self
            .pages
            .iter()
            .filter(|page| filter.admits(page))
            .cloned()
            .collect())
    }
}
