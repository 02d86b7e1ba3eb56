//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the ScanStore trait.

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{ScanStore, StorageError, StorageResult};
use crate::storage::{JobState, ScanStatus, StoredScan};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// SQLite scan store with per-entry expiry
pub struct SqliteScanStore {
    conn: Connection,
    ttl_secs: i64,
}

impl SqliteScanStore {
    /// Opens (or creates) a scan store
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    /// * `ttl_secs` - How long written entries stay readable
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteScanStore)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn open(path: &Path, ttl_secs: u64) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        // Configure SQLite for better performance
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        let store = Self {
            conn,
            ttl_secs: ttl_to_secs(ttl_secs),
        };
        let purged = store.purge_expired()?;
        if purged > 0 {
            tracing::debug!("Purged {} expired scan entries", purged);
        }

        Ok(store)
    }

    /// Creates an in-memory store
    pub fn in_memory(ttl_secs: u64) -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self {
            conn,
            ttl_secs: ttl_to_secs(ttl_secs),
        })
    }

    /// Deletes every expired entry, returning how many rows were removed
    pub fn purge_expired(&self) -> StorageResult<usize> {
        let now = Utc::now().timestamp();
        let status = self
            .conn
            .execute("DELETE FROM scan_status WHERE expires_at <= ?1", params![now])?;
        let results = self
            .conn
            .execute("DELETE FROM scan_results WHERE expires_at <= ?1", params![now])?;
        Ok(status + results)
    }

    fn expires_at(&self) -> i64 {
        Utc::now().timestamp().saturating_add(self.ttl_secs)
    }
}

fn ttl_to_secs(ttl_secs: u64) -> i64 {
    i64::try_from(ttl_secs).unwrap_or(i64::MAX)
}

fn parse_timestamp(value: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Serialization(format!("invalid timestamp '{}': {}", value, e)))
}

impl ScanStore for SqliteScanStore {
    fn put_status(&mut self, owner: &str, status: &ScanStatus) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO scan_status (owner, state, progress, scanned_at, expires_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(owner) DO UPDATE SET
                state = excluded.state,
                progress = excluded.progress,
                scanned_at = excluded.scanned_at,
                expires_at = excluded.expires_at",
            params![
                owner,
                status.state.to_db_string(),
                status.progress,
                status.scanned_at.map(|dt| dt.to_rfc3339()),
                self.expires_at(),
            ],
        )?;
        Ok(())
    }

    fn get_status(&self, owner: &str) -> StorageResult<Option<ScanStatus>> {
        let row = self
            .conn
            .query_row(
                "SELECT state, progress, scanned_at FROM scan_status
                 WHERE owner = ?1 AND expires_at > ?2",
                params![owner, Utc::now().timestamp()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, f64>(1)?,
                        row.get::<_, Option<String>>(2)?,
                    ))
                },
            )
            .optional()?;

        let Some((state, progress, scanned_at)) = row else {
            return Ok(None);
        };

        let state = JobState::from_db_string(&state)
            .ok_or_else(|| StorageError::Database(format!("unknown job state '{}'", state)))?;
        let scanned_at = scanned_at.as_deref().map(parse_timestamp).transpose()?;

        Ok(Some(ScanStatus {
            state,
            progress,
            scanned_at,
        }))
    }

    fn put_results(&mut self, owner: &str, scan: &StoredScan) -> StorageResult<()> {
        let payload = serde_json::to_string(scan)?;
        self.conn.execute(
            "INSERT INTO scan_results (owner, payload, scanned_at, expires_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(owner) DO UPDATE SET
                payload = excluded.payload,
                scanned_at = excluded.scanned_at,
                expires_at = excluded.expires_at",
            params![owner, payload, scan.scanned_at.to_rfc3339(), self.expires_at()],
        )?;
        Ok(())
    }

    fn get_results(&self, owner: &str) -> StorageResult<Option<StoredScan>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM scan_results WHERE owner = ?1 AND expires_at > ?2",
                params![owner, Utc::now().timestamp()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        match payload {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    fn clear_results(&mut self, owner: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM scan_results WHERE owner = ?1", params![owner])?;
        Ok(())
    }
}
