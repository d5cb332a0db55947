//! Deferred asset upload
//!
//! Sends the draft's pending files to the asset store. The icon goes first as a single
//! request; screenshots follow in concurrent batches with a pause between batches.
//! Every successful upload replaces its pending entry in place and the draft is
//! persisted after each batch, so committed URLs survive a reload even if a later
//! batch fails. Failed entries stay pending and are retried on the next run.

use crate::error::FormError;
use crate::manager::ProductFormManager;
use crate::settings::UploadSettings;
use futures::future::join_all;
use makers_core::models::{AssetRef, LocalFile};
use makers_storage::AssetStore;
use std::time::Instant;

/// Outcome of one upload run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub attempted: usize,
    pub failed: usize,
    pub icon_uploaded: bool,
    pub screenshots_uploaded: usize,
    /// One message per failed file
    pub errors: Vec<String>,
}

impl UploadReport {
    pub fn succeeded(&self) -> usize {
        self.attempted - self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Warning text for the user when some uploads failed
    pub fn summary(&self) -> Option<String> {
        if !self.has_failures() {
            return None;
        }
        Some(format!(
            "{} of {} uploads failed. You can retry before submitting.",
            self.failed, self.attempted
        ))
    }
}

pub struct UploadPhase<'a> {
    store: &'a dyn AssetStore,
    settings: &'a UploadSettings,
}

impl<'a> UploadPhase<'a> {
    pub fn new(store: &'a dyn AssetStore, settings: &'a UploadSettings) -> Self {
        Self { store, settings }
    }

    /// Upload every pending asset of the manager's draft.
    ///
    /// Individual upload failures are collected in the report. Only session store
    /// failures abort the run.
    pub async fn run(&self, manager: &mut ProductFormManager) -> Result<UploadReport, FormError> {
        let start = Instant::now();
        let mut report = UploadReport::default();

        self.upload_icon(manager, &mut report).await?;
        self.upload_screenshots(manager, &mut report).await?;

        if report.attempted > 0 {
            tracing::info!(
                mode = %manager.mode(),
                attempted = report.attempted,
                failed = report.failed,
                duration_ms = start.elapsed().as_millis(),
                "Upload phase finished"
            );
        }

        Ok(report)
    }

    async fn upload_icon(
        &self,
        manager: &mut ProductFormManager,
        report: &mut UploadReport,
    ) -> Result<(), FormError> {
        let Some(file) = manager
            .draft()
            .icon
            .as_ref()
            .and_then(AssetRef::pending_file)
            .cloned()
        else {
            return Ok(());
        };

        report.attempted += 1;
        match self.store.upload(&file).await {
            Ok(url) => {
                tracing::debug!(file_name = %file.file_name, url = %url, "Icon uploaded");
                manager.draft_mut().icon = Some(AssetRef::uploaded(url));
                report.icon_uploaded = true;
                manager.persist_draft().await?;
            }
            Err(e) => {
                tracing::warn!(file_name = %file.file_name, error = %e, "Icon upload failed");
                report.failed += 1;
                report.errors.push(format!("{}: {}", file.file_name, e));
            }
        }

        Ok(())
    }

    async fn upload_screenshots(
        &self,
        manager: &mut ProductFormManager,
        report: &mut UploadReport,
    ) -> Result<(), FormError> {
        let pending: Vec<(usize, LocalFile)> = manager
            .draft()
            .screenshots
            .iter()
            .enumerate()
            .filter_map(|(index, asset)| asset.pending_file().map(|f| (index, f.clone())))
            .collect();

        let batch_size = self.settings.batch_size.max(1);
        for (batch_no, batch) in pending.chunks(batch_size).enumerate() {
            if batch_no > 0 && !self.settings.batch_delay.is_zero() {
                tokio::time::sleep(self.settings.batch_delay).await;
            }

            tracing::debug!(batch = batch_no, size = batch.len(), "Uploading screenshot batch");

            let store = self.store;
            let results = join_all(batch.iter().map(|(index, file)| async move {
                (*index, file, store.upload(file).await)
            }))
            .await;

            let mut committed = 0;
            for (index, file, result) in results {
                report.attempted += 1;
                match result {
                    Ok(url) => {
                        manager.draft_mut().screenshots[index] = AssetRef::uploaded(url);
                        committed += 1;
                    }
                    Err(e) => {
                        tracing::warn!(
                            file_name = %file.file_name,
                            position = index,
                            error = %e,
                            "Screenshot upload failed"
                        );
                        report.failed += 1;
                        report.errors.push(format!("{}: {}", file.file_name, e));
                    }
                }
            }

            if committed > 0 {
                report.screenshots_uploaded += committed;
                manager.persist_draft().await?;
            }
        }

        Ok(())
    }
}
