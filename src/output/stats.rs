//! Statistics over scan results
//!
//! This module provides functionality for summarizing and displaying
//! the links of a scan.

use crate::model::LinkType;
use crate::scan::ScanResults;
use std::collections::HashMap;

/// Scan statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanStatistics {
    /// Pages in the result (None for flat results)
    pub total_pages: Option<u64>,

    /// Total number of link records
    pub total_links: u64,

    /// Links that failed verification
    pub broken_links: u64,

    /// Links that went through at least one redirect
    pub redirected_links: u64,

    /// Count of links by type
    pub links_by_type: HashMap<LinkType, u64>,

    /// Count of broken links by status code, or by message when there was no response
    pub broken_by_reason: HashMap<String, u64>,
}

impl ScanStatistics {
    /// Computes statistics from scan results
    pub fn from_results(results: &ScanResults) -> Self {
        let mut stats = Self {
            total_pages: match results {
                ScanResults::Grouped(pages) => Some(pages.len() as u64),
                ScanResults::Flat(_) => None,
            },
            ..Self::default()
        };

        for found in results.found_links() {
            let link = found.link;
            stats.total_links += 1;
            *stats.links_by_type.entry(link.link_type).or_insert(0) += 1;

            if link.redirect_info.has_redirects {
                stats.redirected_links += 1;
            }

            if !link.ok {
                stats.broken_links += 1;
                let reason = match link.status_code {
                    Some(code) => code.to_string(),
                    None => link.message,
                };
                *stats.broken_by_reason.entry(reason).or_insert(0) += 1;
            }
        }

        stats
    }

    /// Percentage of links that verified successfully
    pub fn success_rate(&self) -> f64 {
        if self.total_links == 0 {
            100.0
        } else {
            (self.total_links - self.broken_links) as f64 / self.total_links as f64 * 100.0
        }
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &ScanStatistics) {
    println!("=== Scan Statistics ===\n");

    println!("Overview:");
    if let Some(pages) = stats.total_pages {
        println!("  Pages scanned: {}", pages);
    }
    println!("  Links checked: {}", stats.total_links);
    println!("  Broken links: {}", stats.broken_links);
    println!("  Redirected links: {}", stats.redirected_links);
    println!();

    if !stats.links_by_type.is_empty() {
        println!("Links by Type:");
        for link_type in [LinkType::Internal, LinkType::External, LinkType::Asset] {
            if let Some(count) = stats.links_by_type.get(&link_type) {
                println!("  {}: {}", link_type, count);
            }
        }
        println!();
    }

    if !stats.broken_by_reason.is_empty() {
        println!("Broken Links by Reason:");
        // Sort reasons by count (descending)
        let mut reasons: Vec<_> = stats.broken_by_reason.iter().collect();
        reasons.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (reason, count) in reasons {
            println!("  {}: {}", reason, count);
        }
        println!();
    }

    println!("Success Rate: {:.1}%", stats.success_rate());
}
