//! Order placement and order history

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use tienda_core::types::{OrderRequest, OrderSummary, SaleWithProduct};
use tienda_core::AppState;

use crate::api::auth::AuthUser;
use crate::api::error::ApiError;

use super::require_json;

/// POST /orders response envelope.
#[derive(Debug, Serialize)]
pub struct OrderEnvelope {
    /// The placed order
    pub order: OrderSummary,
}

/// POST /orders: place an order for the authenticated user's cart.
pub async fn create_order(
    AuthUser(claims): AuthUser,
    State(state): State<Arc<AppState>>,
    body: Result<Json<OrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderEnvelope>), ApiError> {
    let request = require_json(body)?;
    let order = state.store.place_order(claims.sub, &request.items).await?;
    Ok((StatusCode::CREATED, Json(OrderEnvelope { order })))
}

/// GET /orders/my-orders: the caller's sales, enriched with product
/// name/image.
pub async fn my_orders(
    AuthUser(claims): AuthUser,
    State(state): State<Arc<AppState>>,
) -> Json<Vec<SaleWithProduct>> {
    Json(state.store.sales_for_user(claims.sub).await)
}
