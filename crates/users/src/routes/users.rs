//! Registration, login and lookup endpoints.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::UserId;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::auth;
use crate::error::UserError;
use crate::model::User;

// -- Request types --

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

// -- Response types --

#[derive(Serialize)]
pub struct RegisterResponse {
    pub user_id: UserId,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

// -- Handlers --

/// POST /api/v1/users/register — create a customer account.
#[tracing::instrument(skip(state, req))]
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), UserError> {
    let name = required(req.name, "name")?;
    let email = required(req.email, "email")?;
    let password = required(req.password, "password")?;

    let password_hash = auth::hash_password(&password)?;
    let user_id = state
        .store
        .insert(name, email, "customer", password_hash)
        .await?;

    tracing::info!(%user_id, "registered user");
    Ok((StatusCode::CREATED, Json(RegisterResponse { user_id })))
}

/// POST /api/v1/users/login — verify credentials and issue a token.
///
/// Wrong email and wrong password are indistinguishable: both produce
/// the same 401.
#[tracing::instrument(skip(state, req))]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, UserError> {
    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let user = state
        .store
        .find_by_email(&email)
        .await
        .ok_or(UserError::InvalidCredentials)?;

    if !auth::verify_password(&password, &user.password_hash) {
        return Err(UserError::InvalidCredentials);
    }

    let token = state.tokens.issue(user.id, &user.role)?;
    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse {
        token,
        user_id: user.id,
        name: user.name,
        email: user.email,
        role: user.role,
    }))
}

/// GET /api/v1/users/{id} — fetch one user's public profile.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, UserError> {
    let user_id = UserId::new(id);
    let user = state
        .store
        .get(user_id)
        .await
        .ok_or(UserError::NotFound(user_id))?;
    Ok(Json(UserResponse::from(user)))
}

fn required(field: Option<String>, name: &'static str) -> Result<String, UserError> {
    match field {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(UserError::MissingField(name)),
    }
}
