//! Admin-only mutations and listings

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use tienda_core::types::{Product, Sale};
use tienda_core::AppState;

use crate::api::auth::AdminUser;
use crate::api::error::ApiError;

use super::require_json;

/// PUT /products/{id} request body.
#[derive(Debug, Deserialize)]
pub struct PriceUpdate {
    /// The new unit price
    pub price: f64,
}

/// PUT /products/{id} response envelope.
#[derive(Debug, Serialize)]
pub struct ProductEnvelope {
    /// The updated product
    pub product: Product,
}

/// DELETE /users/{id} response body.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    /// Confirmation message
    pub message: String,
}

/// PUT /products/{id}: set a product's price.
pub async fn update_price(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
    body: Result<Json<PriceUpdate>, JsonRejection>,
) -> Result<Json<ProductEnvelope>, ApiError> {
    let update = require_json(body)?;
    let product = state.store.set_product_price(id, update.price).await?;
    Ok(Json(ProductEnvelope { product }))
}

/// DELETE /users/{id}: remove a user with no recorded sales.
pub async fn delete_user(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<MessageBody>, ApiError> {
    state.store.delete_user(id).await?;
    Ok(Json(MessageBody {
        message: format!("user {id} deleted"),
    }))
}

/// GET /sales: the full sales list.
pub async fn list_sales(
    AdminUser(_): AdminUser,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<Sale>> {
    Json(state.store.list_sales().await)
}
