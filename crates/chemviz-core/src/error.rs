//! Error types for the Chemviz client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Chemviz client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Every variant is recoverable:
/// nothing in the client core is fatal to the process.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ChemvizError {
    /// A selected file was rejected before any network round-trip.
    /// The user corrects the selection and retries.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network or server failure on any REST call. Surfaced as a dismissible
    /// message; the operation is retriable by re-triggering the same action.
    #[error("Transport error: {message}")]
    Transport {
        /// HTTP status code, when the server answered at all.
        status: Option<u16>,
        message: String,
    },

    /// The session is no longer valid on the server. Treated identically to
    /// logout: the caller resets local state to anonymous.
    #[error("Authentication expired")]
    AuthExpired,

    /// A fetch completed for a dataset that is no longer active. Silently
    /// discarded, never shown to the user.
    #[error("Stale result for dataset '{dataset_id}'")]
    StaleResult { dataset_id: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ChemvizError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Transport error with no status code (connection-level failure)
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Transport error carrying the server's status code
    pub fn transport_status(status: u16, message: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a StaleResult error
    pub fn stale(dataset_id: impl Into<String>) -> Self {
        Self::StaleResult {
            dataset_id: dataset_id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Check if this error means the session expired server-side
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::AuthExpired)
    }

    /// Check if this is a silently-discardable stale fetch result
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::StaleResult { .. })
    }

    /// The message to surface to the user, preferring whatever the server
    /// put in its `{error}` body over transport-level detail.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<std::io::Error> for ChemvizError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ChemvizError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ChemvizError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ChemvizError>`.
pub type Result<T> = std::result::Result<T, ChemvizError>;
