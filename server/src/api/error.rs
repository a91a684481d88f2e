//! Error-to-response mapping
//!
//! Every handler error leaves the API as `{"error": "<message>"}` with the
//! status the taxonomy dictates. Server-side failures are logged and
//! collapsed to a generic 500 body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use tracing::error;

use tienda_core::Error;

/// The uniform error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message, surfaced verbatim by the storefront
    pub error: String,
}

/// Wrapper turning a core [`Error`] into an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::Validation(msg) | Error::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            other => {
                error!("request failed: {other}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl ApiError {
    /// A 500 with the generic body, for failures that have no core error
    /// (e.g. a panicked blocking task). The context only reaches the log.
    pub fn internal(context: &str) -> Self {
        Self(Error::Io(std::io::Error::other(context.to_string())))
    }
}
