//! Chemviz core domain layer.
//!
//! Holds everything the client reasons about without touching the network:
//! the dataset model, the pre-upload validation gate, the dashboard session
//! state machine, the authentication state, and the shared error taxonomy.

pub mod auth;
pub mod config;
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod upload;

// Re-export common error type
pub use error::{ChemvizError, Result};
