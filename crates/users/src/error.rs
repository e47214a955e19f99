//! User service errors with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::UserId;
use thiserror::Error;

/// Errors produced by the user directory.
#[derive(Debug, Error)]
pub enum UserError {
    /// A required registration field was absent or empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Another account already uses this email.
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// Login failed. Deliberately does not say which of email or
    /// password was wrong.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// No user with this ID.
    #[error("user {0} not found")]
    NotFound(UserId),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),

    /// Token issuance or verification failed.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = match &self {
            UserError::MissingField(_) => StatusCode::BAD_REQUEST,
            UserError::DuplicateEmail(_) => StatusCode::CONFLICT,
            UserError::InvalidCredentials | UserError::Token(_) => StatusCode::UNAUTHORIZED,
            UserError::NotFound(_) => StatusCode::NOT_FOUND,
            UserError::Hashing(_) => {
                tracing::error!(error = %self, "internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
