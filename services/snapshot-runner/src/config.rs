//! Configuration for the snapshot runner.

use anyhow::Result;

/// Snapshot runner configuration.
///
/// No CLI flags and no config file: the trigger invokes the binary with no
/// payload, so everything comes from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Log level filter (trace, debug, info, warn, error).
    pub log_level: String,

    /// AWS region override; the SDK default chain applies when unset.
    pub aws_region: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let log_level = std::env::var("WARDEN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let aws_region = std::env::var("WARDEN_AWS_REGION").ok();

        Ok(Self {
            log_level,
            aws_region,
        })
    }
}
