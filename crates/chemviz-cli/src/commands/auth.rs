//! Authentication commands.

use anyhow::{anyhow, Result};
use chemviz_app::DashboardService;
use chemviz_core::auth::AuthState;

pub async fn login(service: &DashboardService, username: &str, password: &str) -> Result<()> {
    let user = service
        .login(username, password)
        .await
        .map_err(|e| anyhow!("Login failed: {}", e.user_message()))?;
    println!("Logged in as {}", user.username);
    Ok(())
}

pub async fn logout(service: &DashboardService) {
    service.logout().await;
    println!("Logged out");
}

pub async fn status(service: &DashboardService) {
    match service.start().await {
        AuthState::Authenticated(user) => println!("Authenticated as {}", user.username),
        _ => println!("Not authenticated"),
    }
}
