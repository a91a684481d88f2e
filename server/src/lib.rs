//! # Tienda Server
//!
//! REST API server for the tienda shop: catalog reads, registration and
//! login, order placement and the admin surface, all over the
//! JSON-file-backed store from `tienda-core`.

#![warn(missing_docs)]

/// HTTP API handlers and routing
pub mod api;
