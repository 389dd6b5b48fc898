//! Dashboard session state.
//!
//! The orchestrator for the upload / visualization / history views. All
//! mutations of the active view and the active dataset flow through
//! [`DashboardState::apply`]; view controllers emit [`DashboardEvent`]s and
//! never mutate this state directly.

pub mod event;
pub mod state;

pub use event::DashboardEvent;
pub use state::{ActiveView, DashboardState};
