//! Access Gate
//!
//! Exchanges shared access codes for sessions on the proxy or chat service,
//! hands proxy-session holders the proxy URL, and issues short-lived admin
//! tokens.

mod access;
mod config;
mod http;
mod session;
mod token;

use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use config::{Args, GateConfig};
use http::AppState;
use session::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // Initialize tracing
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "{}={},tower_http={}",
            env!("CARGO_CRATE_NAME"),
            log_level,
            log_level
        ))
        .json()
        .init();

    info!("Starting access gate");

    let config = GateConfig::from_args(&args)?;

    let sessions = Arc::new(SessionStore::new());
    let state = AppState::new(&config, sessions)?;

    info!(
        port = config.port,
        environment = %config.environment,
        session_policy = %config.session_policy,
        services = ?state.registry.services(),
        public_dir = %config.public_dir.display(),
        "Configuration loaded"
    );

    http::serve(&config, Arc::new(state)).await
}
