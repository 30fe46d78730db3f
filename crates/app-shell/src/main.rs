//! # Campaign Manager
//!
//! Loads configuration, starts the application shell and waits for Ctrl-C.

use anyhow::{Context, Result};
use app_shell::telemetry::init_logging;
use app_shell::{AppConfig, AppShell, StaticDetector};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env();
    init_logging(&config.logging)?;

    let shell = AppShell::new(config, &StaticDetector::desktop())
        .context("Failed to build application shell")?;
    shell.start().await;

    info!("Campaign manager is running. Press Ctrl+C to stop.");
    tokio::signal::ctrl_c().await?;

    shell.shutdown();
    Ok(())
}
