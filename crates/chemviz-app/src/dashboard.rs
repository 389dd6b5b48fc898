//! Dashboard service: the single owner of session state.
//!
//! Wires the auth gate and the three view controllers together and applies
//! every [`DashboardEvent`] to the one [`DashboardState`]. Controllers never
//! mutate session state themselves; they return results which this service
//! interprets, so all mutations are serialized through one logical owner
//! even though fetches run concurrently.

use chemviz_client::EquipmentApi;
use chemviz_core::auth::{AuthState, User};
use chemviz_core::dashboard::{ActiveView, DashboardEvent, DashboardState};
use chemviz_core::dataset::{Analytics, DatasetRef, HistoryEntry};
use chemviz_core::{ChemvizError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auth_gate::AuthGate;
use crate::history::HistoryController;
use crate::upload::UploadController;
use crate::visualization::VisualizationController;

pub struct DashboardService {
    state: RwLock<DashboardState>,
    auth_gate: AuthGate,
    pub upload: UploadController,
    pub visualization: VisualizationController,
    pub history: HistoryController,
}

impl DashboardService {
    pub fn new(api: Arc<dyn EquipmentApi>) -> Self {
        Self {
            state: RwLock::new(DashboardState::new()),
            auth_gate: AuthGate::new(api.clone()),
            upload: UploadController::new(api.clone()),
            visualization: VisualizationController::new(api.clone()),
            history: HistoryController::new(api),
        }
    }

    /// Snapshot of the current session state.
    pub async fn state(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    async fn apply(&self, event: DashboardEvent) -> bool {
        self.state.write().await.apply(event)
    }

    /// If the error says the session expired, treat it exactly like a
    /// logout: reset to anonymous with defaults.
    async fn note_failure(&self, err: &ChemvizError) {
        if err.is_auth_expired() {
            tracing::info!("Session expired server-side, resetting to anonymous");
            self.apply(DashboardEvent::LoggedOut).await;
            self.visualization.clear().await;
        }
    }

    /// Resolves the startup auth probe once and records the outcome.
    pub async fn start(&self) -> AuthState {
        let resolved = self.auth_gate.resolve().await;
        match &resolved {
            AuthState::Authenticated(user) => {
                self.apply(DashboardEvent::LoggedIn { user: user.clone() })
                    .await;
            }
            _ => {
                self.apply(DashboardEvent::LoggedOut).await;
            }
        }
        resolved
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        let user = self.auth_gate.login(username, password).await?;
        self.apply(DashboardEvent::LoggedIn { user: user.clone() })
            .await;
        Ok(user)
    }

    /// Logs out. The server call is best-effort; local state always resets.
    pub async fn logout(&self) {
        self.auth_gate.logout().await;
        self.apply(DashboardEvent::LoggedOut).await;
        self.visualization.clear().await;
    }

    /// Switches tabs. Returns `false` when the transition is refused
    /// (Visualization with no active dataset); the corresponding control
    /// should already be disabled via [`DashboardState::can_select`].
    pub async fn select_tab(&self, view: ActiveView) -> bool {
        self.apply(DashboardEvent::TabClicked { view }).await
    }

    /// Uploads the currently selected candidate. On success the returned
    /// dataset becomes active and the view switches to Visualization; the
    /// visualization controller is pointed at it, ready for
    /// [`Self::load_analytics`].
    pub async fn perform_upload(&self) -> Result<DatasetRef> {
        match self.upload.upload().await {
            Ok(dataset) => {
                self.visualization.set_dataset(&dataset.id).await;
                self.apply(DashboardEvent::UploadSucceeded {
                    dataset: dataset.clone(),
                })
                .await;
                Ok(dataset)
            }
            Err(e) => {
                self.note_failure(&e).await;
                Err(e)
            }
        }
    }

    /// Fetches analytics for the active dataset.
    pub async fn load_analytics(&self) -> Result<Analytics> {
        let dataset_id = self
            .state()
            .await
            .active_dataset_id()
            .map(str::to_string)
            .ok_or_else(|| ChemvizError::internal("no active dataset"))?;

        match self.visualization.load(&dataset_id).await {
            Ok(analytics) => Ok(analytics),
            Err(e) => {
                self.note_failure(&e).await;
                Err(e)
            }
        }
    }

    /// Refreshes the history list.
    pub async fn refresh_history(&self) -> Result<Vec<HistoryEntry>> {
        match self.history.refresh().await {
            Ok(entries) => Ok(entries),
            Err(e) => {
                self.note_failure(&e).await;
                Err(e)
            }
        }
    }

    /// Adopts a dataset from history as the active one and switches to
    /// Visualization, exactly as a fresh upload would.
    pub async fn select_from_history(&self, dataset_id: &str) -> Result<DatasetRef> {
        let dataset = match self.history.select(dataset_id).await {
            Some(dataset) => dataset,
            None => {
                // Not cached yet (e.g. CLI invocation without a prior list)
                self.refresh_history().await?;
                self.history.select(dataset_id).await.ok_or_else(|| {
                    ChemvizError::transport(format!("dataset '{dataset_id}' not found in history"))
                })?
            }
        };

        self.visualization.set_dataset(&dataset.id).await;
        self.apply(DashboardEvent::HistorySelected {
            dataset: dataset.clone(),
        })
        .await;
        Ok(dataset)
    }

    /// Deletes a dataset after confirmation. When the deleted dataset was
    /// the active one, the active reference is cleared and the view is
    /// forced to History, since the visualization's data no longer exists.
    pub async fn delete_dataset(&self, dataset_id: &str, confirmed: bool) -> Result<bool> {
        match self.history.delete(dataset_id, confirmed).await {
            Ok(true) => {
                let was_active = self
                    .apply(DashboardEvent::DatasetDeleted {
                        dataset_id: dataset_id.to_string(),
                    })
                    .await;
                if was_active {
                    self.visualization.clear().await;
                }
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => {
                self.note_failure(&e).await;
                Err(e)
            }
        }
    }
}
