//! Request handlers, one module per API surface

/// Admin-only mutations and listings
pub mod admin;

/// Registration, login and profile
pub mod auth;

/// Public catalog reads
pub mod catalog;

/// Order placement and order history
pub mod orders;

/// Health and root
pub mod system;

use axum::extract::rejection::JsonRejection;
use axum::Json;

use tienda_core::Error;

use super::error::ApiError;

/// Unwrap a JSON body, folding axum's rejection into the Validation arm of
/// the taxonomy so malformed bodies produce the uniform `{"error": …}` shape.
fn require_json<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(ApiError(Error::Validation(rejection.body_text()))),
    }
}
