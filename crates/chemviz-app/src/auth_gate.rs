//! Auth gate: startup session discovery, login, logout.

use chemviz_client::EquipmentApi;
use chemviz_core::auth::{AuthState, User};
use chemviz_core::Result;
use std::sync::Arc;

/// Resolves the initial authenticated/anonymous state and performs the auth
/// round-trips.
///
/// The startup probe's sole purpose is session discovery, so any transport
/// failure during it is semantically identical to "no session" and resolves
/// to [`AuthState::Anonymous`]. There is no retry.
pub struct AuthGate {
    api: Arc<dyn EquipmentApi>,
}

impl AuthGate {
    pub fn new(api: Arc<dyn EquipmentApi>) -> Self {
        Self { api }
    }

    /// Issues the one startup session probe.
    pub async fn resolve(&self) -> AuthState {
        match self.api.current_user().await {
            Ok(user) => {
                tracing::info!("Session probe found existing session for '{}'", user.username);
                AuthState::Authenticated(user)
            }
            Err(e) => {
                tracing::debug!("Session probe found no session: {}", e);
                AuthState::Anonymous
            }
        }
    }

    /// Logs in. The returned user is trusted by the caller without a new
    /// probe, since login itself round-tripped.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        self.api.login(username, password).await
    }

    /// Ends the server-side session, best-effort.
    ///
    /// Local state must not get stuck authenticated when the network call
    /// fails, so the failure is logged and swallowed; the caller always
    /// resets to anonymous.
    pub async fn logout(&self) {
        if let Err(e) = self.api.logout().await {
            tracing::warn!("Server logout failed, resetting local state anyway: {}", e);
        }
    }
}
