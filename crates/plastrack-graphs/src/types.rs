//! Graph types and data structures

use plastrack_config::ChartConfig;
use serde::{Deserialize, Serialize};

/// Fixed title of the trend chart.
pub const TREND_TITLE: &str = "Plastic Usage Trends";
/// Fixed x-axis label of the trend chart.
pub const TREND_X_LABEL: &str = "Date";
/// Fixed y-axis label of the trend chart.
pub const TREND_Y_LABEL: &str = "Plastic Used (kg)";

/// Graph configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Caption drawn above the plot.
    pub title: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// X-axis description.
    pub x_label: String,
    /// Y-axis description.
    pub y_label: String,
    /// Colours, fonts and line styling.
    pub style: StyleConfig,
}

impl GraphConfig {
    /// Configuration of the per-community trend chart.
    pub fn trend(chart: &ChartConfig) -> Self {
        Self {
            title: TREND_TITLE.to_string(),
            width: chart.width,
            height: chart.height,
            x_label: TREND_X_LABEL.to_string(),
            y_label: TREND_Y_LABEL.to_string(),
            style: StyleConfig {
                background_color: Some(chart.background_color.clone()),
                font_family: chart.font_family.clone(),
                ..StyleConfig::default()
            },
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::trend(&ChartConfig::default())
    }
}

/// Data point for graphs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    /// Horizontal coordinate (days from CE for dated series).
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// One named line on a graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    /// Legend label.
    pub name: String,
    /// Points in drawing order.
    pub data: Vec<DataPoint>,
}

/// Styling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Background as `#RRGGBB`; white when absent or unparsable.
    pub background_color: Option<String>,
    /// Font family for every text element.
    pub font_family: String,
    /// Caption font size.
    pub title_font_size: u32,
    /// Tick, axis and legend font size.
    pub label_font_size: u32,
    /// Stroke width of series lines.
    pub line_width: u32,
    /// Radius of the marker drawn on every data point; 0 disables markers.
    pub marker_radius: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: Some("#FFFFFF".to_string()),
            font_family: "sans-serif".to_string(),
            title_font_size: 24,
            label_font_size: 14,
            line_width: 2,
            marker_radius: 3,
        }
    }
}
