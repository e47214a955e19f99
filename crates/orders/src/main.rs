//! Order service entry point.

use std::time::Duration;

use orders::config::Config;
use orders::store::{MemoryOrderStore, SqliteOrderStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    let config = Config::from_env();

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.service_timeout_secs))
        .build()
        .expect("failed to build HTTP client");

    // Schema setup happens here, before the listener binds, so the
    // first request never races table creation.
    let app = match config.database_url {
        Some(ref url) => {
            tracing::info!(database_url = %url, "using SQLite order store");
            let store = SqliteOrderStore::connect(url)
                .await
                .expect("failed to connect to database");
            store
                .init_schema()
                .await
                .expect("failed to initialize database schema");
            orders::create_app(orders::create_state(&config, client, store), metrics_handle)
        }
        None => {
            tracing::info!("DATABASE_URL unset, using in-memory order store");
            let store = MemoryOrderStore::new();
            orders::create_app(orders::create_state(&config, client, store), metrics_handle)
        }
    };

    let addr = config.addr();
    tracing::info!(%addr, "starting order service");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");

    tracing::info!("server shut down gracefully");
}
