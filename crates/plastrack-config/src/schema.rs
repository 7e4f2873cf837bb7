//! Configuration schema definitions using serde.

use plastrack_common::{LoggingConfig, TrackerError};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Smallest accepted chart edge in pixels.
pub const MIN_CHART_EDGE: u32 = 100;
/// Largest accepted chart edge in pixels.
pub const MAX_CHART_EDGE: u32 = 4000;

/// Main configuration structure for the tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Record store configuration.
    pub storage: StorageConfig,
    /// Trend chart configuration.
    pub chart: ChartConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Record store configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the CSV file holding all usage records.
    pub data_file: PathBuf,
}

/// Trend chart configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Where the rendered chart is written; must live under the static directory.
    pub output_path: PathBuf,
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// Background color in `#RRGGBB` form.
    pub background_color: String,
    /// Font family used for the caption, labels, and legend.
    pub font_family: String,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the server listens on.
    pub bind_address: String,
    /// Directory served under the static URL prefix.
    pub static_dir: PathBuf,
    /// URL prefix for static assets.
    pub static_url_prefix: String,
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.storage.data_file.as_os_str().is_empty() {
            return Err(TrackerError::config("Data file path cannot be empty"));
        }

        if self.chart.output_path.file_name().is_none() {
            return Err(TrackerError::config("Chart output path must name a file"));
        }

        for (name, edge) in [("width", self.chart.width), ("height", self.chart.height)] {
            if !(MIN_CHART_EDGE..=MAX_CHART_EDGE).contains(&edge) {
                return Err(TrackerError::config(format!(
                    "Chart {name} must be between {MIN_CHART_EDGE} and {MAX_CHART_EDGE} pixels, got {edge}"
                )));
            }
        }

        if !is_hex_color(&self.chart.background_color) {
            return Err(TrackerError::config(format!(
                "Background color must look like #RRGGBB, got '{}'",
                self.chart.background_color
            )));
        }

        self.server.socket_addr()?;

        let prefix = &self.server.static_url_prefix;
        if !prefix.starts_with('/') || prefix.trim_end_matches('/').is_empty() {
            return Err(TrackerError::config(
                "Static URL prefix must start with '/' and name a path below the root",
            ));
        }

        if self.chart_url().is_none() {
            return Err(TrackerError::config(format!(
                "Chart output path '{}' must be inside the static directory '{}'",
                self.chart.output_path.display(),
                self.server.static_dir.display()
            )));
        }

        Ok(())
    }

    /// Public URL of the chart artifact, if it lives under the static directory.
    pub fn chart_url(&self) -> Option<String> {
        let relative = self.chart.output_path.strip_prefix(&self.server.static_dir).ok()?;
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        if segments.is_empty() {
            return None;
        }
        Some(format!(
            "{}/{}",
            self.server.static_url_prefix.trim_end_matches('/'),
            segments.join("/")
        ))
    }
}

impl ServerConfig {
    /// Parses the configured bind address.
    pub fn socket_addr(&self) -> Result<SocketAddr, TrackerError> {
        self.bind_address.parse().map_err(|e| {
            TrackerError::config_with_source(
                format!("Invalid bind address '{}'", self.bind_address),
                e,
            )
        })
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
