//! Public catalog reads. No auth, no side effects.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use tienda_core::types::Product;
use tienda_core::AppState;

use crate::api::error::ApiError;

/// GET /products: the full catalog.
pub async fn list_products(State(state): State<Arc<AppState>>) -> Json<Vec<Product>> {
    Json(state.store.list_products().await)
}

/// GET /products/{id}: one product, 404 when absent.
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, ApiError> {
    Ok(Json(state.store.get_product(id).await?))
}

/// GET /categories: distinct category values, sorted.
pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.store.list_categories().await)
}
