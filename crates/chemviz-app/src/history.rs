//! History controller.
//!
//! Caches the bounded history list, resolves selections into dataset
//! references, and performs confirmed deletions. The local list is only
//! mutated after the server confirms a deletion; removal is never
//! speculative.

use chemviz_client::EquipmentApi;
use chemviz_core::dataset::{DatasetRef, HistoryEntry};
use chemviz_core::Result;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct HistoryController {
    api: Arc<dyn EquipmentApi>,
    entries: RwLock<Vec<HistoryEntry>>,
}

impl HistoryController {
    pub fn new(api: Arc<dyn EquipmentApi>) -> Self {
        Self {
            api,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Fetches the history list. On failure the previously cached list is
    /// left unchanged and the error is surfaced.
    pub async fn refresh(&self) -> Result<Vec<HistoryEntry>> {
        let datasets = self.api.history().await?;
        let mut entries = self.entries.write().await;
        *entries = datasets.clone();
        Ok(datasets)
    }

    /// Snapshot of the cached list.
    pub async fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.read().await.clone()
    }

    /// Resolves a cached entry into a dataset reference.
    pub async fn select(&self, dataset_id: &str) -> Option<DatasetRef> {
        self.entries
            .read()
            .await
            .iter()
            .find(|e| e.id == dataset_id)
            .map(HistoryEntry::to_dataset_ref)
    }

    /// Deletes a dataset after explicit confirmation.
    ///
    /// Returns `Ok(false)` without any network call when `confirmed` is
    /// false. On server success the entry is removed from the cached list
    /// and `Ok(true)` is returned; on failure the list is unchanged and the
    /// error propagates.
    pub async fn delete(&self, dataset_id: &str, confirmed: bool) -> Result<bool> {
        if !confirmed {
            tracing::debug!("Deletion of {} not confirmed, skipping", dataset_id);
            return Ok(false);
        }

        self.api.delete_dataset(dataset_id).await?;

        let mut entries = self.entries.write().await;
        entries.retain(|e| e.id != dataset_id);
        Ok(true)
    }
}
