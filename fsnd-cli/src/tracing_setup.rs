//! Tracing setup for the fsnd CLI
//!
//! Usage:
//!   fsnd --debug serve trivia       # Debug logging to console
//!   RUST_LOG=tower_http=debug fsnd  # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                        # Log filter (default: info)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
}

impl TracingConfig {
    fn default_directive(&self) -> &'static str {
        if self.debug {
            "debug"
        } else {
            "info"
        }
    }
}

/// Initialize console tracing
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    // RUST_LOG wins over --debug when both are set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
