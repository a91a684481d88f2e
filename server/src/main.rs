//! Tienda API server binary

use clap::{Arg, Command};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tienda_core::core::{config, factory};
use tienda_server::api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new("tienda-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("REST API server for the tienda shop")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path"),
        )
        .get_matches();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("starting tienda API server");

    let config_path = matches.get_one::<String>("config").map(String::as_str);
    let config = config::load_config_or_default(config_path);

    let app_state = std::sync::Arc::new(factory::create_app_state(config).await?);

    tokio::select! {
        result = api::start_api_server(app_state) => {
            warn!("HTTP server terminated unexpectedly");
            result?;
        }
        _ = signal::ctrl_c() => {
            info!("received shutdown signal");
        }
    }

    info!("shutdown complete");
    Ok(())
}
