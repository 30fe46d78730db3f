//! Log output setup.

use crate::container::LoggingConfig;
use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber filtered by `config.level`.
///
/// Fails if the directive is invalid or a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("invalid log filter '{}'", config.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .with_thread_ids(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}
