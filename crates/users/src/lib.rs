//! User directory and authentication service.
//!
//! Holds the registered users, hashes their passwords and issues login
//! tokens. The order service only ever asks one question of this service:
//! "does user N exist?" — answered by `GET /api/v1/users/{id}`.

pub mod auth;
pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod store;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use auth::TokenAuthority;
use store::UserStore;

/// Shared application state accessible from all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: UserStore,
    pub tokens: TokenAuthority,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/v1/users/register", post(routes::users::register))
        .route("/api/v1/users/login", post(routes::users::login))
        .route("/api/v1/users/{id}", get(routes::users::get))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
