//! Gateway error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Why a request could not be forwarded.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The first path segment does not name a known service.
    #[error("service not found")]
    UnknownService(String),

    /// The target service did not answer. The detail is logged, not
    /// returned to the client.
    #[error("gateway failed to reach {service}")]
    Upstream { service: String, detail: String },
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match &self {
            GatewayError::UnknownService(service) => {
                tracing::debug!(%service, "no route for service");
                StatusCode::NOT_FOUND
            }
            GatewayError::Upstream { service, detail } => {
                tracing::warn!(%service, error = %detail, "upstream request failed");
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_hide_upstream_detail() {
        let err = GatewayError::Upstream {
            service: "catalog".to_string(),
            detail: "connection refused (os error 111)".to_string(),
        };
        assert_eq!(err.to_string(), "gateway failed to reach catalog");
    }

    #[test]
    fn test_unknown_service_message() {
        let err = GatewayError::UnknownService("billing".to_string());
        assert_eq!(err.to_string(), "service not found");
    }
}
