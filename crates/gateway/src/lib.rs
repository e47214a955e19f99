//! API gateway: the single entry point clients talk to.
//!
//! Routes `/{service}/{*rest}` to the user, catalog and order services
//! and relays their responses. The gateway holds no state beyond its
//! HTTP client and routing table.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{any, get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::proxy::{GatewayState, ServiceTargets};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<GatewayState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route("/{service}/{*rest}", any(routes::proxy::forward))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates gateway state from configuration.
pub fn create_state(config: &Config) -> Result<Arc<GatewayState>, reqwest::Error> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;

    Ok(Arc::new(GatewayState {
        client,
        targets: ServiceTargets::from_config(config),
    }))
}
