//! # Tienda Core
//!
//! Core types and logic for the tienda shop API: domain model, configuration,
//! the JSON-file-backed store and the auth primitives. This crate carries no
//! HTTP dependencies; the server and storefront crates build on top of it.

#![warn(missing_docs)]

/// Application configuration, state and factory
pub mod core;

/// Domain types and the error taxonomy
pub mod types;

/// JSON-file-backed collections and the repository over them
pub mod storage;

/// Password hashing and bearer tokens
pub mod auth;

// Re-export commonly used items
pub use crate::core::{AppState, Config};
pub use crate::storage::Store;
pub use crate::types::{Error, Result};
