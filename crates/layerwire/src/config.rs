//! Configuration types and loader
//!
//! Configuration is layered: defaults, then an optional TOML file, then
//! `LAYERWIRE_`-prefixed environment variables, merged with Figment. Later
//! sources override earlier ones.
//!
//! ```toml
//! [wiring]
//! policy = "strict"        # "permissive" or "strict"
//!
//! [logging]
//! level = "info"           # trace, debug, info, warn, error
//! json_format = false
//! ```

use crate::error::{ErrorContext, Result};
use crate::logging::parse_log_level;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default environment variable prefix
pub const CONFIG_ENV_PREFIX: &str = "LAYERWIRE";

/// Default configuration file name looked up in the working directory
pub const DEFAULT_CONFIG_FILENAME: &str = "layerwire.toml";

/// Policy applied when a dependency slot's type is not registered
///
/// The original exercise silently leaves such a slot unset; `Permissive`
/// reproduces that behavior and logs the miss. `Strict` turns the miss into
/// an error naming the target type, the field, and the required dependency.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum WirePolicy {
    /// Leave unresolvable slots unset (the original's observed behavior)
    #[default]
    Permissive,

    /// Fail wiring on the first unresolvable slot
    Strict,
}

/// Wiring configuration section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WiringConfig {
    /// Policy for unresolvable dependency slots
    #[serde(default)]
    pub policy: WirePolicy,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Enable JSON output format
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Wiring policy section
    #[serde(default)]
    pub wiring: WiringConfig,

    /// Logging section
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration loader service
#[derive(Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Configuration sources are merged in this order (later sources
    /// override earlier):
    /// 1. Default values from `AppConfig::default()`
    /// 2. TOML configuration file (if it exists)
    /// 3. Environment variables with prefix (e.g. `LAYERWIRE_WIRING_POLICY`)
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        let file = self
            .config_path
            .clone()
            .or_else(Self::find_default_config_path);
        if let Some(path) = file {
            let exists = path.exists();
            debug!(path = %path.display(), exists, "Config file lookup");
            if exists {
                figment = figment.merge(Toml::file(path));
            }
        }

        // Underscore separates nested keys, e.g. LAYERWIRE_LOGGING_LEVEL.
        // Keys whose own name contains an underscore (logging.json_format)
        // cannot be addressed this way: the variable splits at every
        // underscore, so only file and defaults can set them.
        figment = figment.merge(Env::prefixed(&format!("{}_", self.env_prefix)).split("_"));

        let config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let rendered =
            toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")?;
        std::fs::write(path.as_ref(), rendered)?;
        Ok(())
    }

    /// Get the configured file path, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Default config file location: the working directory
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = std::env::current_dir().ok()?;
        let candidate = current_dir.join(DEFAULT_CONFIG_FILENAME);
        candidate.exists().then_some(candidate)
    }

    /// Validate loaded configuration values
    fn validate(config: &AppConfig) -> Result<()> {
        parse_log_level(&config.logging.level)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
