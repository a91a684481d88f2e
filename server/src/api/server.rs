//! HTTP server implementation for the tienda API

use std::sync::Arc;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::routing::{delete, get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use tienda_core::{AppState, Result};

use super::handlers::{admin, auth, catalog, orders, system};

/// Creates the application router with all routes and middleware.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // CORS configuration - permissive, the storefront may be served from
    // anywhere
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_origin(Any);

    Router::new()
        // Root route
        .route("/", get(system::root_handler))
        // Catalog routes
        .route("/products", get(catalog::list_products))
        .route("/products/{id}", get(catalog::get_product))
        .route("/categories", get(catalog::list_categories))
        // Auth routes
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/profile", get(auth::get_profile))
        .route("/auth/profile", put(auth::update_profile))
        // Order routes
        .route("/orders", post(orders::create_order))
        .route("/orders/my-orders", get(orders::my_orders))
        // Admin routes
        .route("/products/{id}", put(admin::update_price))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/sales", get(admin::list_sales))
        // System routes
        .route("/health", get(system::health_check))
        // Apply middleware to all routes
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        // Unified AppState
        .with_state(app_state)
}

/// Start the HTTP server with the configured AppState. Runs until the
/// listener fails.
pub async fn start_api_server(app_state: Arc<AppState>) -> Result<()> {
    let addr = app_state.config.server.http_addr;
    let app = create_router(app_state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("server listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
