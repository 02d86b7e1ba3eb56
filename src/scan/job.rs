//! Scan jobs with persisted status and results
//!
//! A job runs one scan for one owner, recording its progress in a [`ScanStore`] so a
//! later reader (a status poll, a report command) can pick up the outcome.

use crate::scan::{ScanOptions, Scanner};
use crate::source::{ContentSource, PageFilter};
use crate::storage::{JobState, ScanStatus, ScanStore, StoredScan};
use crate::AuditError;
use chrono::Utc;

/// One owner's scan request
#[derive(Debug, Clone)]
pub struct ScanJob {
    pub owner: String,
    pub filter: PageFilter,
    pub options: ScanOptions,
    /// Hash of the configuration, stored with the results
    pub config_hash: Option<String>,
}

impl ScanJob {
    pub fn new(owner: impl Into<String>, filter: PageFilter, options: ScanOptions) -> Self {
        Self {
            owner: owner.into(),
            filter,
            options,
            config_hash: None,
        }
    }

    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.config_hash = Some(hash.into());
        self
    }

    /// Marks the job as queued and clears the owner's previous results
    pub fn queue(&self, store: &mut dyn ScanStore) -> Result<(), AuditError> {
        store.put_status(&self.owner, &ScanStatus::queued())?;
        store.clear_results(&self.owner)?;
        Ok(())
    }

    /// Runs the scan, updating status and storing results
    ///
    /// # Job Flow
    ///
    /// 1. Status `running`, progress 0
    /// 2. Enumerate pages
    /// 3. Scan pages in order, storing progress after each page (a failed progress
    ///    write is logged and the scan carries on)
    /// 4. Store results, then status `completed` with progress 1
    ///
    /// Any error after step 1 leaves the status `failed` (best effort) and is returned.
    pub async fn run(
        &self,
        scanner: &Scanner,
        source: &dyn ContentSource,
        store: &mut dyn ScanStore,
    ) -> Result<StoredScan, AuditError> {
        store.put_status(&self.owner, &ScanStatus::running(0.0))?;

        match self.execute(scanner, source, store).await {
            Ok(stored) => Ok(stored),
            Err(e) => {
                tracing::error!("Scan job for {} failed: {}", self.owner, e);
                if let Err(mark) = store.put_status(&self.owner, &ScanStatus::failed()) {
                    tracing::warn!(
                        "Could not mark scan job for {} as failed: {}",
                        self.owner,
                        mark
                    );
                }
                Err(e)
            }
        }
    }

    async fn execute(
        &self,
        scanner: &Scanner,
        source: &dyn ContentSource,
        store: &mut dyn ScanStore,
    ) -> Result<StoredScan, AuditError> {
        let pages = source.list_scannable_pages(&self.filter)?;
        tracing::info!("Scan job for {}: {} pages", self.owner, pages.len());

        let mut progress_warned = false;
        let results = scanner
            .scan_with_progress(&pages, &self.options, |progress| {
                let status = ScanStatus::running(progress.fraction());
                if let Err(e) = store.put_status(&self.owner, &status) {
                    if !progress_warned {
                        tracing::warn!("Could not record progress for {}: {}", self.owner, e);
                        progress_warned = true;
                    }
                }
            })
            .await;

        let scanned_at = Utc::now();
        let stored = StoredScan {
            results,
            scanned_at,
            options: self.options.clone(),
            config_hash: self.config_hash.clone(),
        };
        store.put_results(&self.owner, &stored)?;
        store.put_status(
            &self.owner,
            &ScanStatus {
                state: JobState::Completed,
                progress: 1.0,
                scanned_at: Some(scanned_at),
            },
        )?;

        Ok(stored)
    }
}
