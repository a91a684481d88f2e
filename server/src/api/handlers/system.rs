//! Health and root handlers

use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current service status
    pub status: String,
    /// Crate version
    pub version: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /: a short, human-readable listing of the API surface.
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "name": "tienda",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "catalog": ["GET /products", "GET /products/{id}", "GET /categories"],
            "auth": ["POST /auth/register", "POST /auth/login", "GET /auth/profile", "PUT /auth/profile"],
            "orders": ["POST /orders", "GET /orders/my-orders"],
            "admin": ["PUT /products/{id}", "DELETE /users/{id}", "GET /sales"],
            "system": ["GET /health"]
        }
    }))
}
