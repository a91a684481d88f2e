//! Application factory
//!
//! Builds a ready-to-serve [`AppState`] from configuration: ensures the data
//! directory and seed files exist, opens the store, and wires up the token
//! service.

use std::sync::Arc;

use tracing::info;

use crate::auth::TokenService;
use crate::core::app_state::AppState;
use crate::core::config::Config;
use crate::storage::{seed, Store};
use crate::types::Result;

/// Create an [`AppState`] from configuration.
///
/// Missing data files are created with seed content on first run; existing
/// files are loaded as-is.
pub async fn create_app_state(config: Config) -> Result<AppState> {
    let data_dir = &config.storage.data_dir;
    tokio::fs::create_dir_all(data_dir).await?;

    seed::ensure_seed_data(data_dir, &config.auth).await?;

    let store = Store::open(data_dir).await?;
    info!(
        products = store.product_count().await,
        users = store.user_count().await,
        sales = store.sale_count().await,
        "store opened from {}",
        data_dir.display()
    );

    let tokens = TokenService::new(&config.auth);
    Ok(AppState::new(Arc::new(store), tokens, config))
}
