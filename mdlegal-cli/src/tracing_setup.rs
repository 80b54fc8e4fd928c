//! Tracing setup for the mdlegal CLI
//!
//! Usage:
//!   mdlegal --debug ...                 # Debug logging to stderr
//!   RUST_LOG=mdlegal_core=debug mdlegal  # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                            # Log filter (default: config log_level, then warn)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Level used when neither `--debug`, `RUST_LOG` nor the config pick one
pub const DEFAULT_LEVEL: &str = "warn";

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets the filter to debug if RUST_LOG is not set)
    pub debug: bool,
    /// Level from the config file
    pub level: Option<String>,
}

impl TracingConfig {
    fn default_directive(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            self.level.as_deref().unwrap_or(DEFAULT_LEVEL)
        }
    }
}

/// Initialize tracing with compact console output on stderr
///
/// Logs go to stderr so table and JSON output on stdout stay clean.
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_flag_wins_over_config_level() {
        let config = TracingConfig {
            debug: true,
            level: Some("info".to_string()),
        };
        assert_eq!(config.default_directive(), "debug");
    }

    #[test]
    fn falls_back_to_warn() {
        assert_eq!(TracingConfig::default().default_directive(), DEFAULT_LEVEL);
    }
}
