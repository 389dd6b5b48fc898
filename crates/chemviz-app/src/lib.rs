//! Chemviz application layer.
//!
//! View controllers for the upload, visualization and history screens, the
//! auth gate, and the [`DashboardService`] that owns the session state and
//! serializes every mutation of it.

pub mod auth_gate;
pub mod dashboard;
pub mod history;
pub mod upload;
pub mod visualization;

#[cfg(test)]
mod dashboard_test;

pub use auth_gate::AuthGate;
pub use dashboard::DashboardService;
pub use history::HistoryController;
pub use upload::UploadController;
pub use visualization::{averages_series, distribution_series, ChartKind, VisualizationController};
