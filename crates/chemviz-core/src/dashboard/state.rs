//! Dashboard state machine.

use serde::{Deserialize, Serialize};

use crate::auth::{AuthState, User};
use crate::dataset::DatasetRef;

use super::event::DashboardEvent;

/// The three mutually exclusive dashboard views.
///
/// A small discrete set of screens, so this is a tagged value rather than
/// independent boolean flags; invalid combinations cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    Upload,
    Visualization,
    History,
}

/// Session state for the dashboard.
///
/// This is the single owner of the active view and the active dataset.
/// Controllers hold only references passed down to them and report results
/// back as [`DashboardEvent`]s, so every mutation is serialized through
/// [`DashboardState::apply`] even though fetches run concurrently.
///
/// Invariant: `view == Visualization` implies `active_dataset.is_some()`.
/// [`DashboardState::can_select`] exposes the guard so the corresponding
/// navigation control can be disabled rather than producing dead clicks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub view: ActiveView,
    pub active_dataset: Option<DatasetRef>,
    pub auth: AuthState,
}

impl DashboardState {
    /// Initial state: upload view, no active dataset, auth probe pending.
    pub fn new() -> Self {
        Self {
            view: ActiveView::Upload,
            active_dataset: None,
            auth: AuthState::Loading,
        }
    }

    /// The currently authenticated user, if any.
    pub fn user(&self) -> Option<&User> {
        self.auth.user()
    }

    /// The id of the active dataset, if any.
    pub fn active_dataset_id(&self) -> Option<&str> {
        self.active_dataset.as_ref().map(|d| d.id.as_str())
    }

    /// Whether a tab for `view` may be selected in the current state.
    ///
    /// Visualization requires an active dataset; the other views are always
    /// reachable.
    pub fn can_select(&self, view: ActiveView) -> bool {
        view != ActiveView::Visualization || self.active_dataset.is_some()
    }

    /// Applies an event, returning `true` if the state changed.
    ///
    /// `false` means either a refused transition (`TabClicked(Visualization)`
    /// with no active dataset, the only refusable one) or an event that had
    /// nothing to change here (`DatasetDeleted` for a non-active dataset,
    /// which only affects locally cached lists held by controllers).
    pub fn apply(&mut self, event: DashboardEvent) -> bool {
        match event {
            DashboardEvent::UploadSucceeded { dataset }
            | DashboardEvent::HistorySelected { dataset } => {
                self.active_dataset = Some(dataset);
                self.view = ActiveView::Visualization;
                true
            }
            DashboardEvent::TabClicked { view } => {
                if !self.can_select(view) {
                    return false;
                }
                self.view = view;
                true
            }
            DashboardEvent::DatasetDeleted { dataset_id } => {
                let was_active = self
                    .active_dataset
                    .as_ref()
                    .is_some_and(|d| d.id == dataset_id);
                if was_active {
                    // The visualization view's data no longer exists, so it
                    // becomes unreachable and history takes over.
                    self.active_dataset = None;
                    self.view = ActiveView::History;
                }
                was_active
            }
            DashboardEvent::LoggedIn { user } => {
                self.auth = AuthState::Authenticated(user);
                true
            }
            DashboardEvent::LoggedOut => {
                self.view = ActiveView::Upload;
                self.active_dataset = None;
                self.auth = AuthState::Anonymous;
                true
            }
        }
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}
