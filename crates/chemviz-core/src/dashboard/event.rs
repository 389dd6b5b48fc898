use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::dataset::DatasetRef;

use super::state::ActiveView;

/// High-level events the view controllers publish to the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// The upload controller finished an upload; the returned dataset
    /// becomes active and the visualization view is shown.
    UploadSucceeded { dataset: DatasetRef },
    /// The user picked a prior dataset from history; same adoption rules
    /// as a fresh upload.
    HistorySelected { dataset: DatasetRef },
    /// The user clicked a navigation tab.
    TabClicked { view: ActiveView },
    /// A dataset was deleted on the server (after confirmation).
    DatasetDeleted { dataset_id: String },
    /// Login round-tripped successfully.
    LoggedIn { user: User },
    /// The user logged out (or the session expired server-side).
    LoggedOut,
}
