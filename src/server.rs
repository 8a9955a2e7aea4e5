//! HTTP server initialization and runtime setup.
//!
//! Builds the invitation API client, wires the repositories into the
//! application state and runs the Axum server until Ctrl+C / SIGTERM.

use crate::config::Config;
use crate::domain::repositories::{AdminRepository, GuestRepository};
use crate::infrastructure::http::{ApiClient, HttpAdminRepository, HttpGuestRepository};
use crate::routes::app_router;
use crate::state::{AppState, SiteSettings};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the application state for a configuration.
///
/// # Errors
///
/// Returns an error if the API base URL is unusable.
pub fn build_state(config: &Config) -> Result<AppState> {
    let client =
        ApiClient::new(&config.api_base_url).context("Failed to create invitation API client")?;

    let guest_repository: Arc<dyn GuestRepository> =
        Arc::new(HttpGuestRepository::new(client.clone()));
    let admin_repository: Arc<dyn AdminRepository> = Arc::new(HttpAdminRepository::new(client));

    Ok(AppState::new(
        guest_repository,
        admin_repository,
        config.code_prefix.clone(),
        SiteSettings::from_config(config),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The API client cannot be created
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    tracing::info!(api_host = %api_host(&config), "Invitation API client ready");

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn api_host(config: &Config) -> String {
    url::Url::parse(&config.api_base_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
