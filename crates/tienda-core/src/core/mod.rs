//! Core application logic and configuration

/// Application configuration
pub mod config;

/// Application state management
pub mod app_state;

/// Factory for app creation
pub mod factory;

// Re-export commonly used items
pub use app_state::AppState;
pub use config::{load_config_or_default, Config};
pub use factory::create_app_state;
