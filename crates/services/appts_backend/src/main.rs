// File: services/appts_backend/src/main.rs
use std::sync::Arc;
use std::time::Duration;

use appts_config::load_config;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

mod app;
mod app_state;

use app::build_router;
use app_state::AppState;

/// How long in-flight requests may run after a shutdown signal.
const SHUTDOWN_DRAIN: Duration = Duration::from_secs(30);

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
                error!("Failed to listen for SIGTERM: {}", e);
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

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(load_config()?);
    let _log_guard = appts_common::init_with_config(&config.logging);

    let state = AppState::from_config(config.clone()).await?;
    let db_client = state.db_client.clone();
    let app = build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    let shutdown = CancellationToken::new();
    let server = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown.clone().cancelled_owned());
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server => {
            // The server stopped on its own, most likely an accept error
            result??;
            return Ok(());
        }
        _ = shutdown_signal() => shutdown.cancel(),
    }

    match tokio::time::timeout(SHUTDOWN_DRAIN, server).await {
        Ok(result) => result??,
        Err(_) => warn!(
            "In-flight requests still running after {}s, exiting",
            SHUTDOWN_DRAIN.as_secs()
        ),
    }

    if let Some(db) = db_client {
        db.close().await;
    }
    info!("Server stopped");
    Ok(())
}
