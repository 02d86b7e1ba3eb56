//! Link set builder
//!
//! Turns one page into the ordered, deduplicated list of link records to verify.
//!
//! # Build Steps
//!
//! 1. Live page with `check-entry-urls`: the page URL itself, typed internal
//! 2. Live page with `check-content-links`: links from the rendered HTML, resolved
//!    against the page URL
//! 3. Non-live page with `check-content-links`: URLs found in structured fields
//! 4. Ignore-pattern filter, then link-mode filter
//! 5. Deduplication by URL, first occurrence wins

use crate::extract::{extract_field_urls, extract_html_links, LinkSource};
use crate::model::{LinkRecord, LinkType, Page};
use crate::scan::ScanOptions;
use crate::url::{classify_url, normalize_link, IgnorePatterns, SiteHosts};
use crate::verify::Verifier;
use std::collections::HashSet;

/// Builds link sets for pages under one set of scan options
pub struct LinkSetBuilder<'a> {
    options: &'a ScanOptions,
    site_hosts: &'a SiteHosts,
    ignore: IgnorePatterns,
}

impl<'a> LinkSetBuilder<'a> {
    pub fn new(options: &'a ScanOptions, site_hosts: &'a SiteHosts) -> Self {
        Self {
            options,
            site_hosts,
            ignore: options.ignore_rules(),
        }
    }

    /// Builds the link set of a page, fetching its HTML when it is live
    ///
    /// A failed fetch contributes no links and is not an error.
    pub async fn build(&self, page: &Page, verifier: &Verifier) -> Vec<LinkRecord> {
        let html = if page.is_live() && self.options.check_content_links {
            verifier.fetch_html(&page.url).await
        } else {
            None
        };

        self.assemble(page, html.as_deref())
    }

    /// Builds the link set of a page from already-fetched HTML
    ///
    /// `html` is only consulted for live pages.
    pub fn assemble(&self, page: &Page, html: Option<&str>) -> Vec<LinkRecord> {
        let mut candidates: Vec<(String, LinkType)> = Vec::new();

        if page.is_live() {
            if self.options.check_entry_urls {
                candidates.push((page.url.clone(), LinkType::Internal));
            }
            if self.options.check_content_links {
                if let Some(html) = html {
                    candidates.extend(self.html_candidates(page, html));
                }
            }
        } else if self.options.check_content_links {
            candidates.extend(self.field_candidates(page));
        }

        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for (url, link_type) in candidates {
            if self.ignore.matches(&url) {
                tracing::debug!("Ignoring {} (matches ignore pattern)", url);
                continue;
            }
            if !self.options.link_mode.admits(link_type) {
                continue;
            }
            if !seen.insert(url.clone()) {
                continue;
            }
            records.push(LinkRecord::pending(&page.id, &url, link_type));
        }

        records
    }

    fn html_candidates(&self, page: &Page, html: &str) -> Vec<(String, LinkType)> {
        let hosts = self.site_hosts.with_url_host(&page.url);
        let mut candidates = Vec::new();

        for raw in extract_html_links(html, self.options.check_assets) {
            let Some(url) = normalize_link(&raw.value, &page.url) else {
                tracing::debug!("Dropping unresolvable link {:?} on {}", raw.value, page.url);
                continue;
            };

            let link_type = match raw.kind {
                LinkSource::Source => LinkType::Asset,
                LinkSource::Anchor => classify_url(&url, &hosts),
            };
            if link_type == LinkType::Asset && !self.options.check_assets {
                continue;
            }

            candidates.push((url, link_type));
        }

        candidates
    }

    fn field_candidates(&self, page: &Page) -> Vec<(String, LinkType)> {
        extract_field_urls(&page.fields)
            .into_iter()
            .filter_map(|url| {
                let link_type = classify_url(&url, self.site_hosts);
                if link_type == LinkType::Asset && !self.options.check_assets {
                    None
                } else {
                    Some((url, link_type))
                }
            })
            .collect()
    }
}

/// Builds the link set of one page
///
/// Convenience wrapper around [`LinkSetBuilder`].
pub async fn build_link_set(
    page: &Page,
    options: &ScanOptions,
    site_hosts: &SiteHosts,
    verifier: &Verifier,
) -> Vec<LinkRecord> {
    LinkSetBuilder::new(options, site_hosts)
        .build(page, verifier)
        .await
}
