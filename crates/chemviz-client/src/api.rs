//! Typed API surface of the Chemviz server.
//!
//! The application layer depends on this trait, not on any concrete HTTP
//! client, so controllers can be exercised against mock implementations.

use async_trait::async_trait;
use chemviz_core::auth::User;
use chemviz_core::dataset::{Analytics, DatasetRef, HistoryEntry};
use chemviz_core::Result;

/// REST operations the Chemviz server exposes.
///
/// All operations run against an established cookie session (credentials
/// included); an unauthorized response surfaces as
/// [`ChemvizError::AuthExpired`](chemviz_core::ChemvizError::AuthExpired).
#[async_trait]
pub trait EquipmentApi: Send + Sync {
    /// Establishes a session via `POST /auth/login/` and returns the user.
    async fn login(&self, username: &str, password: &str) -> Result<User>;

    /// Ends the server-side session via `POST /auth/logout/`.
    async fn logout(&self) -> Result<()>;

    /// Session probe, `GET /auth/user/`. Returns the user when a session
    /// exists; any 4xx means no session.
    async fn current_user(&self) -> Result<User>;

    /// Multipart upload of raw CSV bytes to `POST /upload/` (file field
    /// `file`). Returns the reference to the newly created dataset.
    async fn upload_csv(&self, filename: &str, bytes: Vec<u8>) -> Result<DatasetRef>;

    /// Fetches the full analytics detail for one dataset from
    /// `GET /analytics/{id}/`.
    async fn analytics(&self, dataset_id: &str) -> Result<Analytics>;

    /// Fetches the bounded list of prior datasets from `GET /history/`,
    /// newest first. The server determines the bound; the client does not
    /// paginate.
    async fn history(&self) -> Result<Vec<HistoryEntry>>;

    /// Permanently deletes a dataset via `DELETE /datasets/{id}/`.
    async fn delete_dataset(&self, dataset_id: &str) -> Result<()>;
}
