//! Catalog service errors with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::CarId;
use thiserror::Error;

/// Errors produced by the catalog endpoints.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No car model with this ID.
    #[error("Car model {0} not found")]
    UnknownCar(CarId),

    /// A required request field was absent.
    #[error("{0} is required")]
    MissingField(&'static str),
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            CatalogError::UnknownCar(_) => StatusCode::NOT_FOUND,
            CatalogError::MissingField(_) => StatusCode::BAD_REQUEST,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
