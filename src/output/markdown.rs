//! Markdown report generation
//!
//! This module generates human-readable markdown reports of a stored scan,
//! including statistics, broken links and redirect chains.

use crate::output::stats::ScanStatistics;
use crate::output::OutputResult;
use crate::storage::StoredScan;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown report of a scan to a file
///
/// # Arguments
///
/// * `scan` - The completed scan
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the report
/// * `Err(OutputError)` - Failed to write the report
pub fn generate_markdown_report(scan: &StoredScan, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(scan);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Escapes characters that would break a table cell
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}

/// Formats a scan as markdown
pub fn format_markdown_report(scan: &StoredScan) -> String {
    let stats = ScanStatistics::from_results(&scan.results);
    let links = scan.results.found_links();
    let mut md = String::new();

    md.push_str("# Link Audit Report\n\n");

    // Scan metadata
    md.push_str("## Scan Information\n\n");
    md.push_str(&format!("- **Scanned**: {}\n", scan.scanned_at.to_rfc3339()));
    md.push_str(&format!("- **Link Mode**: {}\n", scan.options.link_mode));
    md.push_str(&format!(
        "- **Assets Checked**: {}\n",
        if scan.options.check_assets { "yes" } else { "no" }
    ));
    md.push_str(&format!(
        "- **Concurrency**: {}\n",
        scan.options.effective_concurrency()
    ));
    if let Some(hash) = &scan.config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    if let Some(pages) = stats.total_pages {
        md.push_str(&format!("- **Pages Scanned**: {}\n", pages));
    }
    md.push_str(&format!("- **Links Checked**: {}\n", stats.total_links));
    md.push_str(&format!("- **Broken Links**: {}\n", stats.broken_links));
    md.push_str(&format!(
        "- **Redirected Links**: {}\n",
        stats.redirected_links
    ));
    md.push_str(&format!(
        "- **Success Rate**: {:.2}%\n\n",
        stats.success_rate()
    ));

    // Broken links
    let broken: Vec<_> = links.iter().filter(|found| !found.link.ok).collect();
    if !broken.is_empty() {
        md.push_str("## Broken Links\n\n");
        md.push_str("| URL | Type | Status | Message | Found On |\n");
        md.push_str("|-----|------|--------|---------|----------|\n");

        for found in broken {
            let link = &found.link;
            md.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                cell(&link.url),
                link.link_type,
                link.status_code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                cell(&link.message),
                cell(&found.found_on)
            ));
        }
        md.push('\n');
    }

    // Redirect chains
    let redirected: Vec<_> = links
        .iter()
        .filter(|found| found.link.redirect_info.has_redirects)
        .collect();
    if !redirected.is_empty() {
        md.push_str("## Redirects\n\n");
        md.push_str("| URL | Hops | Codes | Final URL |\n");
        md.push_str("|-----|------|-------|-----------|\n");

        for found in redirected {
            let info = &found.link.redirect_info;
            let codes: Vec<String> = info.status_codes.iter().map(|c| c.to_string()).collect();
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                cell(&found.link.url),
                info.redirect_count,
                codes.join(" → "),
                cell(&info.final_url)
            ));
        }
        md.push('\n');
    }

    md
}
