//! Order service: validates submissions against the user and catalog
//! services and persists confirmed orders.
//!
//! The write path is buffer-then-commit: every check runs against a
//! draft held in memory, and a single atomic store call persists the
//! order only after all checks pass. Structured logging (tracing) and
//! Prometheus metrics cover each step.

pub mod config;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod rejection;
pub mod request;
pub mod routes;
pub mod services;
pub mod status;
pub mod store;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use orchestrator::OrderOrchestrator;
use routes::orders::AppState;
use services::{Catalog, HttpCatalog, HttpUserDirectory, UserDirectory};
use store::OrderStore;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<U, C, S>(state: Arc<AppState<U, C, S>>, metrics_handle: PrometheusHandle) -> Router
where
    U: UserDirectory + 'static,
    C: Catalog + 'static,
    S: OrderStore + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/v1/orders", post(routes::orders::create::<U, C, S>))
        .route("/api/v1/orders", get(routes::orders::list::<U, C, S>))
        .route("/api/v1/orders/{id}", get(routes::orders::get::<U, C, S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state wired to the real user and catalog
/// services over HTTP, with the given order store.
pub fn create_state<S: OrderStore>(
    config: &Config,
    client: reqwest::Client,
    store: S,
) -> Arc<AppState<HttpUserDirectory, HttpCatalog, S>> {
    let users = HttpUserDirectory::new(client.clone(), config.user_service_url.clone());
    let catalog = HttpCatalog::new(client, config.catalog_service_url.clone());

    Arc::new(AppState {
        orchestrator: OrderOrchestrator::new(users, catalog, store),
    })
}
