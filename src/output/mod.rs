//! Output module for presenting scan results
//!
//! This module handles:
//! - Console reports (text lines or JSON) for one-off and CI scans
//! - Statistics over the links of a scan
//! - Markdown reports written to a file

mod console;
mod markdown;
pub mod stats;

pub use console::{format_json_report, format_text_report, JsonReport, ReportedError};
pub use markdown::{format_markdown_report, generate_markdown_report};
pub use stats::{print_statistics, ScanStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
