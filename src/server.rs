//! HTTP server initialization and runtime setup.
//!
//! Handles the storage connection, service wiring, and Axum server lifecycle.

use crate::application::services::LinkService;
use crate::config::Config;
use crate::infrastructure::persistence::{SqliteLinkRepository, connect_pool, run_migrations};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::alias_generator::RandomAliasGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage directory and SQLite connection pool
/// - Apply migrations
/// - Link service with the random alias generator
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Storage cannot be opened or migrated
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    if let Some(dir) = Path::new(&config.storage_path).parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create storage directory {}", dir.display()))?;
    }

    let pool = connect_pool(&config.storage_path, &config.pool_settings())
        .await
        .context("Failed to open storage")?;
    tracing::info!(path = %config.storage_path, "Connected to storage");

    run_migrations(&pool)
        .await
        .context("Failed to migrate storage")?;

    let link_repository = Arc::new(SqliteLinkRepository::with_timeout(
        Arc::new(pool),
        config.storage_timeout(),
    ));
    let link_service = Arc::new(LinkService::new(
        link_repository,
        Arc::new(RandomAliasGenerator::new()),
        config.alias_length,
    ));

    let state = AppState::new(link_service, config.basic_auth.clone());

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
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

    tracing::info!("Shutdown signal received, draining connections");
}
