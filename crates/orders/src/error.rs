//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::rejection::OrderRejection;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// The order was rejected by the orchestrator.
    Rejection(OrderRejection),
    /// Internal server error.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Rejection(rejection) => rejection_to_response(rejection),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn rejection_to_response(rejection: OrderRejection) -> (StatusCode, String) {
    match &rejection {
        OrderRejection::Validation(_) => (StatusCode::BAD_REQUEST, rejection.to_string()),
        OrderRejection::UserInvalid { .. } => (StatusCode::NOT_FOUND, rejection.to_string()),
        OrderRejection::InsufficientInventory { .. } => {
            (StatusCode::CONFLICT, rejection.to_string())
        }
        OrderRejection::CatalogUnreachable { .. } | OrderRejection::PricingUnavailable { .. } => {
            (StatusCode::SERVICE_UNAVAILABLE, rejection.to_string())
        }
        OrderRejection::Persistence(err) => {
            tracing::error!(error = %err, "order persistence failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "order could not be persisted".to_string(),
            )
        }
    }
}

impl From<OrderRejection> for ApiError {
    fn from(rejection: OrderRejection) -> Self {
        ApiError::Rejection(rejection)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
