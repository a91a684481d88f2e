//! Bearer-token extractors
//!
//! Protected routes take an [`AuthUser`] argument; admin routes take an
//! [`AdminUser`]. A missing `Authorization` header is a 401; a present but
//! unverifiable token (bad signature, expired) is a 403, as is a non-admin
//! claim on an admin route.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use tienda_core::auth::Claims;
use tienda_core::types::{Error, Role};
use tienda_core::AppState;

use super::error::ApiError;

/// The verified claims of an authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

/// The verified claims of an authenticated admin.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError(Error::Auth("missing bearer token".to_string())))?;
    header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError(Error::Auth("missing bearer token".to_string())))
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state
            .tokens
            .verify(token)
            .map_err(|_| ApiError(Error::Forbidden("invalid or expired token".to_string())))?;
        Ok(AuthUser(claims))
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;
        if claims.role != Role::Admin {
            return Err(ApiError(Error::Forbidden(
                "admin access required".to_string(),
            )));
        }
        Ok(AdminUser(claims))
    }
}
