//! Storage layer: JSON-file-backed collections and the repository over them.
//!
//! Each collection (products, users, sales) lives wholly in memory and is
//! mirrored to one JSON file. Every mutation rewrites the complete
//! collection via a temp-then-rename so the canonical file is never torn.

/// A single JSON-file-backed collection
pub mod collection;

/// Seed data for first startup
pub mod seed;

/// The repository over the three collections
pub mod store;

pub use collection::JsonCollection;
pub use store::Store;
