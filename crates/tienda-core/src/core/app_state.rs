//! Shared application state
//!
//! One `AppState` is built at startup and shared across all request handlers
//! behind an `Arc`.

use std::sync::Arc;

use crate::auth::TokenService;
use crate::core::config::Config;
use crate::storage::Store;

/// Central application state holding the store and auth services.
pub struct AppState {
    /// The JSON-file-backed store
    pub store: Arc<Store>,

    /// Bearer-token issue/verify service
    pub tokens: TokenService,

    /// Application configuration
    pub config: Config,
}

impl AppState {
    /// Create a new AppState. Called by the factory after the store has been
    /// opened.
    pub fn new(store: Arc<Store>, tokens: TokenService, config: Config) -> Self {
        Self {
            store,
            tokens,
            config,
        }
    }
}
