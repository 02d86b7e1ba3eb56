//! Scan module
//!
//! This module contains the scan pipeline:
//! - Options: link mode, toggles, ignore rules, concurrency
//! - Builder: per-page link set construction
//! - Coordinator: verification, outcome merging and result shaping
//! - Job: a scan run with persisted status and results

mod builder;
mod coordinator;
mod job;
mod options;

pub use builder::{build_link_set, LinkSetBuilder};
pub use coordinator::{merge_outcomes, FoundLink, ScanProgress, ScanResults, Scanner};
pub use job::ScanJob;
pub use options::{clamp_concurrency, LinkMode, ScanOptions, MAX_CONCURRENCY, MIN_CONCURRENCY};
