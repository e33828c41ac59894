//! Structured logging

use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Initialize JSON logging
///
/// `RUST_LOG` takes precedence over the configured level.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_filter()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| Error::Internal(format!("failed to install tracing subscriber: {}", e)))?;

    tracing::info!(
        service = %config.service.name,
        environment = %config.service.environment,
        debug = config.debug,
        "Tracing initialized"
    );

    Ok(())
}
