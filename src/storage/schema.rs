//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Link Auditor database.

/// SQL schema for the database
///
/// `expires_at` columns hold Unix timestamps so expiry can be checked in SQL.
pub const SCHEMA_SQL: &str = r#"
-- Job status per owner
CREATE TABLE IF NOT EXISTS scan_status (
    owner TEXT PRIMARY KEY,
    state TEXT NOT NULL,
    progress REAL NOT NULL DEFAULT 0,
    scanned_at TEXT,
    expires_at INTEGER NOT NULL
);

-- Last completed scan per owner
CREATE TABLE IF NOT EXISTS scan_results (
    owner TEXT PRIMARY KEY,
    payload TEXT NOT NULL,
    scanned_at TEXT NOT NULL,
    expires_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_scan_status_expires ON scan_status(expires_at);
CREATE INDEX IF NOT EXISTS idx_scan_results_expires ON scan_results(expires_at);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
