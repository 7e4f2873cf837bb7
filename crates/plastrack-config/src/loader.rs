//! Configuration loading utilities.

use crate::Config;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "PLASTRACK_CONFIG_PATH";

/// Configuration files searched for in the working directory, in order.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["config.yaml", "config.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file '{}': {source}", path.display())]
    IoError {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Name of the offending variable.
        var: String,
        /// Parse failure of its value.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] plastrack_common::TrackerError),
}

impl From<ConfigError> for plastrack_common::TrackerError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(inner) => inner,
            other => Self::config(other.to_string()),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse_yaml(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Load configuration from an explicit path, the environment, or the
    /// working directory, falling back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_config(path);
        }

        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Self::load_config(path);
        }

        if let Some(path) = DEFAULT_CONFIG_FILES.iter().map(Path::new).find(|p| p.exists()) {
            return Self::load_config(path);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML document; missing sections and fields take their defaults.
    pub fn parse_yaml(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("PLASTRACK_DATA_FILE") {
            config.storage.data_file = PathBuf::from(path);
        }

        if let Some(path) = lookup("PLASTRACK_CHART_PATH") {
            config.chart.output_path = PathBuf::from(path);
        }

        if let Some(width) = lookup("PLASTRACK_CHART_WIDTH") {
            config.chart.width = parse_env("PLASTRACK_CHART_WIDTH", &width)?;
        }

        if let Some(height) = lookup("PLASTRACK_CHART_HEIGHT") {
            config.chart.height = parse_env("PLASTRACK_CHART_HEIGHT", &height)?;
        }

        if let Some(address) = lookup("PLASTRACK_BIND_ADDRESS") {
            config.server.bind_address = address;
        }

        if let Some(dir) = lookup("PLASTRACK_STATIC_DIR") {
            config.server.static_dir = PathBuf::from(dir);
        }

        if let Some(level) = lookup("PLASTRACK_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_env<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}
