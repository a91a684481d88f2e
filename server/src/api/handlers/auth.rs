//! Registration, login and profile handlers

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use tienda_core::auth::{hash_password, verify_password};
use tienda_core::types::{NewUser, ProfileUpdate, UserProfile};
use tienda_core::{AppState, Error};

use crate::api::auth::AuthUser;
use crate::api::error::ApiError;

use super::require_json;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Display name (required)
    pub name: String,
    /// Email address (required, unique)
    pub email: String,
    /// Plaintext password (required; hashed before storage)
    pub password: String,
    /// Optional phone number
    #[serde(default)]
    pub phone: Option<String>,
    /// Optional postal address
    #[serde(default)]
    pub address: Option<String>,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Successful register/login response: the stripped user plus a bearer
/// token.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// The account, password stripped
    pub user: UserProfile,
    /// Bearer token for subsequent requests
    pub token: String,
}

/// PUT /auth/profile response envelope.
#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    /// The updated account, password stripped
    pub user: UserProfile,
}

// Identical message for unknown email and wrong password, so responses do
// not reveal which emails exist.
fn invalid_credentials() -> ApiError {
    ApiError(Error::Auth("invalid credentials".to_string()))
}

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let body = require_json(body)?;

    let name = body.name.trim();
    let email = body.email.trim();
    if name.is_empty() || email.is_empty() || body.password.is_empty() {
        return Err(ApiError(Error::Validation(
            "name, email and password are required".to_string(),
        )));
    }

    // bcrypt blocks for tens of milliseconds; keep it off the executor.
    let cost = state.config.auth.bcrypt_cost;
    let password = body.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|_| ApiError::internal("password hashing task failed"))??;

    let user = state
        .store
        .register_user(NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash,
            phone: body.phone,
            address: body.address,
        })
        .await?;

    let token = state.tokens.issue(&user)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.profile(),
            token,
        }),
    ))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let body = require_json(body)?;

    let user = state
        .store
        .find_user_by_email(body.email.trim())
        .await
        .ok_or_else(invalid_credentials)?;

    let password = body.password;
    let hash = user.password_hash.clone();
    let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|_| ApiError::internal("password verification task failed"))??;
    if !matches {
        return Err(invalid_credentials());
    }

    let token = state.tokens.issue(&user)?;
    Ok(Json(AuthResponse {
        user: user.profile(),
        token,
    }))
}

/// GET /auth/profile
pub async fn get_profile(
    AuthUser(claims): AuthUser,
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserProfile>, ApiError> {
    let user = state.store.get_user(claims.sub).await?;
    Ok(Json(user.profile()))
}

/// PUT /auth/profile
pub async fn update_profile(
    AuthUser(claims): AuthUser,
    State(state): State<Arc<AppState>>,
    body: Result<Json<ProfileUpdate>, JsonRejection>,
) -> Result<Json<UserEnvelope>, ApiError> {
    let update = require_json(body)?;
    let user = state.store.update_profile(claims.sub, update).await?;
    Ok(Json(UserEnvelope {
        user: user.profile(),
    }))
}
