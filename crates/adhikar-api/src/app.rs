//! Application builder and server entry point.

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use adhikar_core::config::AppConfig;
use adhikar_core::error::{AppError, ErrorKind};
use adhikar_database::Stores;

use crate::router::build_router;
use crate::state::AppState;

/// Build the complete Axum application for the given configuration and stores.
pub fn build_app(config: AppConfig, stores: Stores) -> Result<Router, AppError> {
    let state = AppState::new(config, stores)?;
    Ok(build_router(state))
}

/// Serve the API until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig, stores: Stores) -> Result<(), AppError> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(
        store = %config.store.backend,
        transition_policy = %config.workflow.transition_policy,
        "Starting Jan Adhikar server"
    );

    let pool = stores.pool.clone();
    let app = build_app(config, stores)?;

    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Internal, format!("Failed to bind {addr}"), e)
    })?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    if let Some(pool) = pool {
        pool.close().await;
    }
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
