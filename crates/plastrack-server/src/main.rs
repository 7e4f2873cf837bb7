//! Main entry point for the plastic usage tracker.

use anyhow::{Context, Result};
use clap::Parser;
use plastrack_common::init_logging;
use plastrack_config::ConfigLoader;
use plastrack_server::{Args, TrackerServer};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config =
        ConfigLoader::load(args.config.as_deref()).context("failed to load configuration")?;
    args.apply_to(&mut config);
    config.validate().context("invalid configuration")?;

    let _log_guard = init_logging(&config.logging).context("failed to initialize logging")?;

    info!("Starting plastic usage tracker");

    let server = TrackerServer::new(config);
    server.prepare()?;

    if let Err(e) = server.start().await {
        error!("Server failed: {}", e);
        return Err(e.into());
    }

    Ok(())
}
