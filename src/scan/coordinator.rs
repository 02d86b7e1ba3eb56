//! Scan coordinator - page scanning and result shaping
//!
//! This module ties the scan together:
//! - Building each page's link set
//! - Verifying the page's unique URLs through the pool
//! - Merging outcomes back into link records
//! - Shaping the final result (grouped per page, or flat external links)

use crate::model::{LinkRecord, LinkType, Page, PageMeta, PageResult};
use crate::scan::{LinkMode, LinkSetBuilder, ScanOptions};
use crate::url::SiteHosts;
use crate::verify::{check_urls_concurrently, LinkOutcome, Verifier};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A link reported outside its page context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoundLink {
    #[serde(flatten)]
    pub link: LinkRecord,
    /// Page title, or the page URL when the title is empty
    pub found_on: String,
    /// Where an editor fixes the page
    pub found_on_url: Option<String>,
}

impl FoundLink {
    pub fn new(page: &PageMeta, link: LinkRecord) -> Self {
        Self {
            link,
            found_on: page.display_name().to_string(),
            found_on_url: page.edit_url.clone(),
        }
    }
}

/// Final shape of a scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "items", rename_all = "lowercase")]
pub enum ScanResults {
    /// External links from every page, each tagged with the page it was found on
    Flat(Vec<FoundLink>),
    /// One entry per scanned page
    Grouped(Vec<PageResult>),
}

impl ScanResults {
    /// Shapes per-page results according to the link mode
    ///
    /// `external` mode flattens every external record; other modes keep the pages.
    pub fn shape(mode: LinkMode, pages: Vec<PageResult>) -> Self {
        match mode {
            LinkMode::External => Self::Flat(
                pages
                    .into_iter()
                    .flat_map(|result| {
                        let page = result.page;
                        result
                            .links
                            .into_iter()
                            .filter(|link| link.link_type == LinkType::External)
                            .map(move |link| FoundLink::new(&page, link))
                    })
                    .collect(),
            ),
            LinkMode::Internal | LinkMode::Both => Self::Grouped(pages),
        }
    }

    /// Every link of the scan paired with the page it was found on
    pub fn found_links(&self) -> Vec<FoundLink> {
        match self {
            Self::Flat(links) => links.clone(),
            Self::Grouped(pages) => pages
                .iter()
                .flat_map(|result| {
                    result
                        .links
                        .iter()
                        .map(|link| FoundLink::new(&result.page, link.clone()))
                })
                .collect(),
        }
    }

    /// Total number of link records
    pub fn link_count(&self) -> usize {
        match self {
            Self::Flat(links) => links.len(),
            Self::Grouped(pages) => pages.iter().map(|p| p.links.len()).sum(),
        }
    }

    /// Number of link records that failed verification
    pub fn broken_count(&self) -> usize {
        match self {
            Self::Flat(links) => links.iter().filter(|l| !l.link.ok).count(),
            Self::Grouped(pages) => pages.iter().map(PageResult::broken_count).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.link_count() == 0
    }
}

/// Progress of a multi-page scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanProgress {
    /// Pages finished so far
    pub done: usize,
    pub total: usize,
}

impl ScanProgress {
    /// Fraction of pages finished, in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

/// Copies verification outcomes onto link records by URL
///
/// A record with no outcome is marked as not verified ("No response" unless it already
/// carries a message).
pub fn merge_outcomes(records: &mut [LinkRecord], outcomes: &HashMap<String, LinkOutcome>) {
    for record in records.iter_mut() {
        match outcomes.get(&record.url) {
            Some(outcome) => outcome.apply_to(record),
            None => record.mark_no_response(),
        }
    }
}

/// Runs scans against the corpus' site hosts with one shared verifier
#[derive(Debug, Clone)]
pub struct Scanner {
    verifier: Verifier,
    site_hosts: SiteHosts,
}

impl Scanner {
    pub fn new(verifier: Verifier, site_hosts: SiteHosts) -> Self {
        Self {
            verifier,
            site_hosts,
        }
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    pub fn site_hosts(&self) -> &SiteHosts {
        &self.site_hosts
    }

    /// Builds, verifies and merges the links of one page
    pub async fn scan_page(&self, page: &Page, options: &ScanOptions) -> PageResult {
        let builder = LinkSetBuilder::new(options, &self.site_hosts);
        let mut links = builder.build(page, &self.verifier).await;

        let urls: Vec<String> = links.iter().map(|link| link.url.clone()).collect();
        let outcomes = self.verify(&urls, options.concurrency).await;
        merge_outcomes(&mut links, &outcomes);

        tracing::debug!(
            "Scanned {} ({} links, {} broken)",
            page.url,
            links.len(),
            links.iter().filter(|l| !l.ok).count()
        );

        PageResult {
            page: page.meta(),
            links,
        }
    }

    /// Scans pages in order and shapes the result by link mode
    pub async fn scan(&self, pages: &[Page], options: &ScanOptions) -> ScanResults {
        self.scan_with_progress(pages, options, |_| {}).await
    }

    /// Like [`Scanner::scan`], reporting progress after every page
    pub async fn scan_with_progress<F>(
        &self,
        pages: &[Page],
        options: &ScanOptions,
        mut on_progress: F,
    ) -> ScanResults
    where
        F: FnMut(ScanProgress),
    {
        tracing::info!(
            "Scanning {} pages (mode: {}, concurrency: {})",
            pages.len(),
            options.link_mode,
            options.effective_concurrency()
        );

        let mut results = Vec::with_capacity(pages.len());
        for (i, page) in pages.iter().enumerate() {
            results.push(self.scan_page(page, options).await);
            on_progress(ScanProgress {
                done: i + 1,
                total: pages.len(),
            });
        }

        let shaped = ScanResults::shape(options.link_mode, results);
        tracing::info!(
            "Scan complete: {} links checked, {} with issues",
            shaped.link_count(),
            shaped.broken_count()
        );
        shaped
    }

    /// Verifies a batch of URLs; one outcome per distinct URL
    pub async fn verify(
        &self,
        urls: &[String],
        concurrency: usize,
    ) -> HashMap<String, LinkOutcome> {
        check_urls_concurrently(&self.verifier, urls, concurrency).await
    }
}
