//! Default configuration values.

use crate::schema::{ChartConfig, Config, ServerConfig, StorageConfig};
use plastrack_common::LoggingConfig;
use std::path::PathBuf;

/// Default record store file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "plastic_usage.csv";
/// Default static asset directory.
pub const DEFAULT_STATIC_DIR: &str = "static";
/// Default chart artifact path.
pub const DEFAULT_CHART_PATH: &str = "static/plot.png";
/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            chart: ChartConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from(DEFAULT_CHART_PATH),
            width: 1000,
            height: 600,
            background_color: "#FFFFFF".to_string(),
            font_family: "sans-serif".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            static_url_prefix: "/static".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage.data_file, PathBuf::from("plastic_usage.csv"));
        assert_eq!(config.chart_url().as_deref(), Some("/static/plot.png"));
    }
}
