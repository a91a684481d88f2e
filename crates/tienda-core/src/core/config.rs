//! Configuration for the tienda API service
//!
//! Settings come from an optional TOML file with code defaults, plus
//! environment overrides for the values that differ per deployment: the
//! listen address (`TIENDA_HTTP_ADDR`) and the token-signing secret
//! (`TIENDA_TOKEN_SECRET`).

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Auth configuration
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address
    #[serde(default = "default_http_addr")]
    pub http_addr: SocketAddr,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding products.json, users.json and sales.json
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// Auth configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign bearer tokens
    #[serde(default = "default_token_secret")]
    pub token_secret: String,

    /// Token validity window in seconds
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,

    /// bcrypt work factor for password hashing
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            storage: StorageConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: default_http_addr(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: default_token_secret(),
            token_ttl_secs: default_token_ttl_secs(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

// Default value functions for serde
fn default_http_addr() -> SocketAddr {
    "0.0.0.0:8080".parse().expect("static address parses")
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_token_secret() -> String {
    "tienda-dev-secret".to_string()
}
fn default_token_ttl_secs() -> u64 {
    86_400
}
fn default_bcrypt_cost() -> u32 {
    10
}

/// Load configuration from file
pub fn load_config(path: &str) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

/// Load configuration from file or use defaults, then apply environment
/// overrides.
pub fn load_config_or_default(path: Option<&str>) -> Config {
    let mut config = match path {
        Some(path) => match load_config(path) {
            Ok(config) => {
                info!("loaded configuration from {path}");
                config
            }
            Err(e) => {
                warn!("failed to load config from {path}: {e}; using defaults");
                Config::default()
            }
        },
        None => {
            info!("no config file specified, using defaults");
            Config::default()
        }
    };

    if let Ok(addr) = std::env::var("TIENDA_HTTP_ADDR") {
        match addr.parse() {
            Ok(addr) => config.server.http_addr = addr,
            Err(e) => warn!("ignoring invalid TIENDA_HTTP_ADDR {addr:?}: {e}"),
        }
    }
    if let Ok(secret) = std::env::var("TIENDA_TOKEN_SECRET") {
        config.auth.token_secret = secret;
    }
    if config.auth.token_secret == default_token_secret() {
        warn!("token secret is the built-in default; set TIENDA_TOKEN_SECRET in production");
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.http_addr.port(), 8080);
        assert_eq!(config.auth.token_ttl_secs, 86_400);
        assert_eq!(config.auth.bcrypt_cost, 10);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [server]
            http_addr = "127.0.0.1:9000"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.http_addr.port(), 9000);
        assert_eq!(config.storage.data_dir, PathBuf::from("./data"));
        assert_eq!(config.auth.bcrypt_cost, 10);
    }
}
