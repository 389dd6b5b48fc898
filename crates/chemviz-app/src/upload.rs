//! Upload controller.
//!
//! Owns the transient upload view state: the selected candidate (with its
//! bytes), the in-flight flag, and the surfaced error/success messages.
//! A successful upload hands the new [`DatasetRef`] back to the dashboard
//! service, which adopts it.

use chemviz_client::EquipmentApi;
use chemviz_core::dataset::DatasetRef;
use chemviz_core::upload::UploadCandidate;
use chemviz_core::{ChemvizError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct UploadSlot {
    candidate: Option<UploadCandidate>,
    bytes: Vec<u8>,
    uploading: bool,
    error: Option<String>,
    success: Option<String>,
}

/// Drives a single upload attempt: select, validate, upload.
pub struct UploadController {
    api: Arc<dyn EquipmentApi>,
    slot: RwLock<UploadSlot>,
}

impl UploadController {
    pub fn new(api: Arc<dyn EquipmentApi>) -> Self {
        Self {
            api,
            slot: RwLock::new(UploadSlot::default()),
        }
    }

    /// Selects a file, running it through the validation gate first.
    ///
    /// On rejection the reason is surfaced, no candidate is stored, and no
    /// network call happens. Selecting a new file replaces any previous
    /// candidate and clears stale messages.
    pub async fn select_file(&self, filename: &str, bytes: Vec<u8>) -> Result<()> {
        let mut slot = self.slot.write().await;
        slot.error = None;
        slot.success = None;

        let candidate = UploadCandidate::new(filename, bytes.len() as u64);
        if let Err(rejection) = candidate.validate() {
            slot.error = Some(rejection.to_string());
            return Err(ChemvizError::validation(rejection.to_string()));
        }

        slot.candidate = Some(candidate);
        slot.bytes = bytes;
        Ok(())
    }

    /// Clears the selected candidate and any surfaced messages.
    pub async fn clear_selection(&self) {
        let mut slot = self.slot.write().await;
        slot.candidate = None;
        slot.bytes.clear();
        slot.error = None;
        slot.success = None;
    }

    /// The currently selected candidate, if any.
    pub async fn selected(&self) -> Option<UploadCandidate> {
        self.slot.read().await.candidate.clone()
    }

    /// Whether an upload is in flight. The upload action is disabled while
    /// this is true; concurrent uploads are not permitted.
    pub async fn is_uploading(&self) -> bool {
        self.slot.read().await.uploading
    }

    /// The currently surfaced error message, if any.
    pub async fn error(&self) -> Option<String> {
        self.slot.read().await.error.clone()
    }

    /// The currently surfaced success message, if any.
    pub async fn success(&self) -> Option<String> {
        self.slot.read().await.success.clone()
    }

    /// Uploads the selected candidate.
    ///
    /// On success the pending state is cleared and the new dataset reference
    /// is returned for adoption. On transport failure the candidate stays
    /// selected so the user can retry without reselecting, and the server's
    /// error message (or a generic fallback) is surfaced.
    pub async fn upload(&self) -> Result<DatasetRef> {
        let (filename, bytes) = {
            let mut slot = self.slot.write().await;
            if slot.uploading {
                return Err(ChemvizError::internal("an upload is already in flight"));
            }
            let candidate = slot
                .candidate
                .as_ref()
                .ok_or_else(|| ChemvizError::validation("no file selected"))?;
            let filename = candidate.filename.clone();
            slot.uploading = true;
            slot.error = None;
            slot.success = None;
            (filename, slot.bytes.clone())
        };

        let result = self.api.upload_csv(&filename, bytes).await;

        let mut slot = self.slot.write().await;
        slot.uploading = false;
        match result {
            Ok(dataset) => {
                slot.candidate = None;
                slot.bytes.clear();
                slot.success = Some(format!(
                    "File uploaded successfully! {} records processed.",
                    dataset.record_count
                ));
                Ok(dataset)
            }
            Err(e) => {
                let message = match &e {
                    ChemvizError::Transport { message, .. } => message.clone(),
                    _ => "Upload failed".to_string(),
                };
                tracing::warn!("Upload of '{}' failed: {}", filename, e);
                slot.error = Some(message);
                Err(e)
            }
        }
    }
}
