//! Station service HTTP server
//!
//! Main entry point: loads configuration, opens the database, wires the
//! station service into the router and serves until SIGINT/SIGTERM.

use std::{sync::Arc, time::Duration};

use anyhow::Context;
use application::{DatabaseHealthPort, StationRepository, StationService};
use axum::http::{HeaderValue, Method};
use infrastructure::{
    AppConfig, AsyncDatabase, AsyncDatabaseConfig, SqliteDatabaseHealth, SqliteStationStore,
    init_logging,
};
use presentation_http::{create_router, set_expose_internal_errors, state::AppState};
use tokio::{net::TcpListener, signal, sync::oneshot};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    init_logging(config.server.log_format, &config.server.log_filter)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        "Station service starting"
    );

    set_expose_internal_errors(!config.is_production());

    // Storage
    let database = AsyncDatabase::new(&AsyncDatabaseConfig::from(&config.database))
        .await
        .context("Failed to open database")?;
    if config.database.run_migrations {
        database.migrate().await.context("Failed to run migrations")?;
    }

    let repository: Arc<dyn StationRepository> =
        Arc::new(SqliteStationStore::new(database.pool().clone()));
    let database_health: Arc<dyn DatabaseHealthPort> =
        Arc::new(SqliteDatabaseHealth::new(database.pool().clone()));

    let station_service = StationService::with_config(repository, (&config.storage).into());
    let state = AppState::new(Arc::new(station_service), database_health);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server.allowed_origins));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = stop_rx.await;
            })
            .await
    });

    shutdown_signal().await;
    let _ = stop_tx.send(());

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    info!(?shutdown_timeout, "Draining connections");
    match tokio::time::timeout(shutdown_timeout, server).await {
        Ok(joined) => joined??,
        Err(_) => warn!("Connections did not drain in time, shutting down anyway"),
    }

    database.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Permissive CORS when no origins are configured, otherwise an allow-list
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%origin, error = %e, "Ignoring CORS origin that is not a valid header value");
                None
            },
        })
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any)
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
