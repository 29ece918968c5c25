//! Structured logging with tracing
//!
//! Configures the tracing subscriber from [`LoggingConfig`]: level filtering
//! via `LAYERWIRE_LOG` (falling back to the configured level) and either
//! plain or JSON formatted output.

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize logging with the provided configuration
///
/// Installs the global default subscriber; calling this twice reports a
/// configuration error.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter =
        EnvFilter::try_from_env("LAYERWIRE_LOG").unwrap_or_else(|_| EnvFilter::new(&config.level));

    // Types differ between the two branches, so each installs separately
    let installed = if config.json_format {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
    } else {
        fmt().with_env_filter(filter).with_target(true).try_init()
    };

    installed.map_err(|e| Error::Configuration {
        message: "Failed to install tracing subscriber".to_string(),
        source: Some(e),
    })?;

    info!("Logging initialized with level: {}", level);
    Ok(())
}

/// Parse a log level string to a tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Valid levels: trace, debug, info, warn, error"
        ))),
    }
}
