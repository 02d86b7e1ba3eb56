//! Console reports
//!
//! Text reports list one line per broken link (and optionally per working link) followed
//! by a summary line. JSON reports carry the totals and every broken link.

use crate::output::OutputResult;
use crate::scan::{FoundLink, ScanResults};
use serde::Serialize;

/// A broken link as listed in a JSON report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedError {
    pub url: String,
    #[serde(rename = "type")]
    pub link_type: String,
    pub status_code: Option<u16>,
    pub message: String,
    pub found_on: String,
}

impl From<&FoundLink> for ReportedError {
    fn from(found: &FoundLink) -> Self {
        Self {
            url: found.link.url.clone(),
            link_type: found.link.link_type.to_string(),
            status_code: found.link.status_code,
            message: found.link.message.clone(),
            found_on: found.found_on.clone(),
        }
    }
}

/// Machine-readable report of a scan
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport {
    pub total_links: usize,
    pub error_count: usize,
    pub errors: Vec<ReportedError>,
}

impl JsonReport {
    pub fn from_results(results: &ScanResults) -> Self {
        let links = results.found_links();
        let errors: Vec<ReportedError> = links
            .iter()
            .filter(|found| !found.link.ok)
            .map(ReportedError::from)
            .collect();

        Self {
            total_links: links.len(),
            error_count: errors.len(),
            errors,
        }
    }
}

fn status_label(status_code: Option<u16>) -> String {
    status_code
        .map(|code| code.to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Formats a text report
///
/// Broken links are always listed; working links only when `show_ok` is set.
pub fn format_text_report(results: &ScanResults, show_ok: bool) -> String {
    let links = results.found_links();
    let mut out = String::new();
    let mut errors = 0;

    for found in &links {
        let link = &found.link;
        if !link.ok {
            errors += 1;
            let message = if link.message.is_empty() {
                "Unknown error"
            } else {
                link.message.as_str()
            };
            out.push_str(&format!(
                "[ERROR] {} {} ({}) - {}\n",
                status_label(link.status_code),
                link.url,
                link.link_type,
                message
            ));
        } else if show_ok {
            out.push_str(&format!(
                "[OK]    {} {} ({})\n",
                status_label(link.status_code),
                link.url,
                link.link_type
            ));
        }
    }

    out.push_str(&format!(
        "\nSummary: {} links checked, {} with issues.\n",
        links.len(),
        errors
    ));
    out
}

/// Formats a pretty-printed JSON report
pub fn format_json_report(results: &ScanResults) -> OutputResult<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::from_results(
        results,
    ))?)
}
