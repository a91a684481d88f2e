//! HTTP API module for the tienda server

/// Bearer-token extractors
pub mod auth;

/// Error-to-response mapping
pub mod error;

/// Request handlers
pub mod handlers;

/// Router assembly and serving
pub mod server;

pub use error::ApiError;
pub use server::{create_router, start_api_server};
