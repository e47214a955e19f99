//! Catalog and inventory service.
//!
//! Serves the car model catalog and answers stock availability checks.
//! Stock for a model may be spread across several dealer locations; an
//! availability check sums them. Data is demo-seeded at startup, matching
//! the deployment model where this service is reset on every boot.

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use store::CatalogStore;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(store: CatalogStore) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/v1/catalog/cars", get(routes::cars::list))
        .route("/api/v1/catalog/cars/{id}", get(routes::cars::get))
        .route("/api/v1/inventory/check", post(routes::inventory::check))
        .with_state(store)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
