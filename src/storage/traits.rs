//! Storage traits and error types
//!
//! This module defines the trait interface for scan stores and
//! associated error types.

use crate::storage::{ScanStatus, StoredScan};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for scan store implementations
///
/// Every entry is keyed by an owner (a user, a CI job, ...) so concurrent owners never
/// see each other's scans. Entries expire; an expired entry reads as absent.
pub trait ScanStore {
    /// Replaces the owner's job status
    fn put_status(&mut self, owner: &str, status: &ScanStatus) -> StorageResult<()>;

    /// Gets the owner's job status, if present and not expired
    fn get_status(&self, owner: &str) -> StorageResult<Option<ScanStatus>>;

    /// Replaces the owner's stored results
    fn put_results(&mut self, owner: &str, scan: &StoredScan) -> StorageResult<()>;

    /// Gets the owner's stored results, if present and not expired
    fn get_results(&self, owner: &str) -> StorageResult<Option<StoredScan>>;

    /// Removes the owner's stored results
    fn clear_results(&mut self, owner: &str) -> StorageResult<()>;
}
