//! Authentication state and user identity.

use serde::{Deserialize, Serialize};

/// The authenticated user, as returned by the session probe or login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Authentication state resolved once at startup by the auth gate.
///
/// `Loading` exists only between process start and the completion of the
/// single session probe. A failed probe is semantically identical to "no
/// session" and resolves to `Anonymous`; there is no retry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum AuthState {
    /// The startup session probe has not completed yet.
    Loading,
    /// A server-side session exists for this user.
    Authenticated(User),
    /// No session (or the probe failed, which is treated the same).
    Anonymous,
}

impl AuthState {
    /// Returns the user when authenticated.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}
