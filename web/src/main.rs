//! Todo server binary.
//!
//! Loads configuration, connects to `PostgreSQL`, applies migrations and
//! serves the RPC router until Ctrl+C or SIGTERM.

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use todo_manager_postgres::PostgresTodoStore;
use todo_manager_web::{AppState, Config, build_router, metrics::register_rpc_metrics};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment alone is enough.
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "todo_server=info,todo_manager_web=info,todo_manager_postgres=info,tower_http=debug"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Todo server");

    let config = Config::from_env();
    info!(
        address = %config.server_address(),
        max_connections = config.database.max_connections,
        metrics_enabled = config.metrics.enabled,
        "Configuration loaded"
    );

    if config.metrics.enabled {
        let metrics_addr: SocketAddr = config
            .metrics_address()
            .parse()
            .with_context(|| format!("invalid metrics address {}", config.metrics_address()))?;
        PrometheusBuilder::new()
            .with_http_listener(metrics_addr)
            .install()
            .context("failed to install Prometheus exporter")?;
        register_rpc_metrics();
        info!(address = %metrics_addr, "Prometheus metrics available at /metrics");
    }

    info!("Connecting to database...");
    let store =
        PostgresTodoStore::connect_with(&config.database.url, &config.database.pool_options())
            .await
            .context("failed to connect to database")?;
    info!("Database connected");

    if config.database.run_migrations {
        store.migrate().await.context("failed to run migrations")?;
        info!("Migrations applied");
    }

    let app = build_router(AppState::new(Arc::new(store)));

    let addr = config.server_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Waits for Ctrl+C (SIGINT) or SIGTERM. A handler that cannot be installed
/// is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(error = %error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            },
            Err(error) => {
                warn!(error = %error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
