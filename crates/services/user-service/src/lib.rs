//! User Service Library
//!
//! This crate provides user management over HTTP: create, get, update,
//! delete and list, backed by PostgreSQL through SeaORM.

pub mod config;
pub mod diagnostics;
pub mod extractors;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::diagnostics::diagnostics_router;
use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::UserService;

/// Run the user service until Ctrl+C or SIGTERM.
pub async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    info!(?config, "Starting user service");

    // Initialize database
    let db = Database::connect(&config).await?;

    // Create repository and service
    let user_repo = Arc::new(UserStore::new(db.get_connection()));
    let app = UserService::new(user_repo)
        .router()
        .layer(TraceLayer::new_for_http());

    // Diagnostics endpoint
    let diag_listener = TcpListener::bind(&config.diag_addr).await?;
    info!("Diagnostics listening on {}", diag_listener.local_addr()?);
    let diag_app = diagnostics_router(db);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(diag_listener, diag_app).await {
            error!(error = %e, "Diagnostics server stopped");
        }
    });

    let listener = TcpListener::bind(config.listen_addr()).await?;
    info!("User service listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("User service stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
