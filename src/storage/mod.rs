//! Storage module for persisting scan jobs
//!
//! This module keeps the state of a scan between requests:
//! - Job status and progress, keyed by owner
//! - The last completed scan's results, options and timestamp
//! - Expiry of both after a configurable time to live

mod schema;
mod sqlite;
mod traits;

pub use sqlite::SqliteScanStore;
pub use traits::{ScanStore, StorageError, StorageResult};

use crate::scan::{ScanOptions, ScanResults};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a scan job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// No job has been queued
    #[default]
    Idle,
    Queued,
    Running,
    Completed,
    Failed,
}

impl JobState {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "idle" => Some(Self::Idle),
            "queued" => Some(Self::Queued),
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Returns true while a job is waiting or in progress
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Queued | Self::Running)
    }
}

/// Status of an owner's scan job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatus {
    pub state: JobState,
    /// Fraction of pages scanned, in `[0, 1]`
    pub progress: f64,
    /// Set once a scan completes
    pub scanned_at: Option<DateTime<Utc>>,
}

impl ScanStatus {
    pub fn idle() -> Self {
        Self {
            state: JobState::Idle,
            progress: 0.0,
            scanned_at: None,
        }
    }

    pub fn queued() -> Self {
        Self {
            state: JobState::Queued,
            ..Self::idle()
        }
    }

    pub fn failed() -> Self {
        Self {
            state: JobState::Failed,
            ..Self::idle()
        }
    }

    pub fn running(progress: f64) -> Self {
        Self {
            state: JobState::Running,
            progress,
            scanned_at: None,
        }
    }
}

/// A completed scan as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredScan {
    pub results: ScanResults,
    pub scanned_at: DateTime<Utc>,
    pub options: ScanOptions,
    /// Hash of the configuration the scan ran with
    pub config_hash: Option<String>,
}
