pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

use application::PetopiaApp;
use infrastructure::{config::ClientConfig, env::get_env_opt, repositories::SqliteTokenStore};
use presentation::dtos::LoginRequest;
use std::sync::Arc;
use tracing::{info, warn};

/// Runs the client until Ctrl-C: restores the stored session, optionally
/// logs in from `PETOPIA_USERNAME`/`PETOPIA_PASSWORD`, then follows the
/// unread notification count.
pub async fn run() -> anyhow::Result<()> {
    let config = ClientConfig::from_env()?;
    let storage_path = config.resolve_storage_path()?;
    info!("Using session storage at {}", storage_path.display());

    let token_store = Arc::new(SqliteTokenStore::new(&storage_path)?);
    let app = PetopiaApp::new(config, token_store).await?;

    if !app.session().is_authenticated() {
        match (get_env_opt("PETOPIA_USERNAME"), get_env_opt("PETOPIA_PASSWORD")) {
            (Some(username), Some(password)) => {
                let status = app
                    .session_controller()
                    .login(LoginRequest { username, password })
                    .await?;
                info!(
                    "Logged in as {}",
                    status.username.unwrap_or_else(|| "unknown user".to_string())
                );
            }
            _ => warn!("No stored session and no credentials; notifications stay idle"),
        }
    }

    app.start();

    let mut feed = app.notifications().subscribe();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown requested");
                break;
            }
            changed = feed.changed() => {
                if changed.is_err() {
                    break;
                }
                let unread = feed.borrow_and_update().unread_count;
                info!("Unread notifications: {}", unread);
            }
        }
    }

    app.shutdown().await;
    Ok(())
}
