//! Employee directory server.
//!
//! Usage: `employee-directory [CONFIG_DIR]` (defaults to `./config`).
//! Log verbosity follows `RUST_LOG`, defaulting to `info`.

use std::net::SocketAddr;

use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use employee_directory::api::{AppState, create_router};
use employee_directory::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config";

fn init_tracing() -> Result<(), tracing_subscriber::util::TryInitError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let config_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;

    let db = config.build_database();
    let summary = config.seed(&db)?;
    info!(
        config_dir = %config_dir,
        employees = summary.employees,
        compensation = summary.compensation,
        "database ready"
    );

    let state = AppState::new(db, config.compensation_policy());
    let addr: SocketAddr = config.server().bind_address.parse()?;
    info!(%addr, "starting HTTP server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, create_router(state)).await?;
    Ok(())
}
