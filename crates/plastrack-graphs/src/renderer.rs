//! Graph rendering trait and implementations

use crate::types::{DataSet, GraphConfig};
use crate::utils::{calculate_data_ranges, format_x_label, write_atomically};
use plastrack_common::{Result, TrackerError};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Trait for rendering graphs to PNG images.
pub trait GraphRenderer: Send + Sync {
    /// Render a graph to PNG bytes
    fn render_to_bytes(&self, config: &GraphConfig, datasets: &[DataSet]) -> Result<Vec<u8>>;

    /// Render a graph to a file path, replacing any previous file atomically
    fn render_to_file(&self, config: &GraphConfig, datasets: &[DataSet], path: &Path) -> Result<()> {
        let bytes = self.render_to_bytes(config, datasets)?;
        write_atomically(path, &bytes)?;
        info!("Successfully rendered chart to {}", path.display());
        Ok(())
    }

    /// Parse a color string (hex format) to RGBColor
    fn parse_color(&self, color_str: &str) -> RGBColor {
        if let Some(hex) = color_str.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return RGBColor(r, g, b);
                }
            }
        }
        // Default to black if parsing fails
        RGBColor(0, 0, 0)
    }

    /// Get background color from style config
    fn get_background_color(&self, config: &GraphConfig) -> RGBColor {
        config
            .style
            .background_color
            .as_ref()
            .map_or(RGBColor(255, 255, 255), |color| self.parse_color(color))
    }
}

/// Line colours, cycled when there are more series than entries.
pub const SERIES_PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Colour of the series at `index`.
pub const fn series_color(index: usize) -> RGBColor {
    SERIES_PALETTE[index % SERIES_PALETTE.len()]
}

/// Whether text in `family` can be laid out by the font backend.
pub fn font_available(family: &str) -> bool {
    (family, 12).into_font().box_size("Ag").is_ok()
}

fn plot_error<E>(context: &'static str) -> impl FnOnce(E) -> TrackerError
where
    E: std::error::Error + Send + Sync + 'static,
{
    move |e| TrackerError::graph_with_source(context, e)
}

/// Multi-series line chart renderer backed by the plotters bitmap backend
#[derive(Debug, Default)]
pub struct LineChartRenderer;

impl LineChartRenderer {
    /// Creates a new line chart renderer.
    pub const fn new() -> Self {
        Self
    }

    fn draw(
        &self,
        root: &DrawingArea<BitMapBackend<'_>, Shift>,
        config: &GraphConfig,
        datasets: &[DataSet],
    ) -> Result<()> {
        let style = &config.style;
        let family = style.font_family.as_str();

        root.fill(&self.get_background_color(config))
            .map_err(plot_error("failed to fill background"))?;

        let (x_min, x_max, y_min, y_max) = calculate_data_ranges(datasets);

        let mut chart = ChartBuilder::on(root)
            .caption(&config.title, (family, style.title_font_size))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(plot_error("failed to build chart axes"))?;

        chart
            .configure_mesh()
            .x_desc(config.x_label.as_str())
            .y_desc(config.y_label.as_str())
            .x_labels(8)
            .x_label_formatter(&format_x_label)
            .label_style((family, style.label_font_size))
            .axis_desc_style((family, style.label_font_size))
            .draw()
            .map_err(plot_error("failed to draw mesh"))?;

        for (i, dataset) in datasets.iter().enumerate() {
            let line_style = series_color(i).stroke_width(style.line_width);
            let line_data = dataset.data.iter().map(|point| (point.x, point.y));

            chart
                .draw_series(LineSeries::new(line_data, line_style))
                .map_err(plot_error("failed to draw series"))?
                .label(dataset.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

            if style.marker_radius > 0 {
                let marker_style = line_style.filled();
                let radius = style.marker_radius;
                chart
                    .draw_series(
                        dataset
                            .data
                            .iter()
                            .map(|point| Circle::new((point.x, point.y), radius, marker_style)),
                    )
                    .map_err(plot_error("failed to draw markers"))?;
            }

            debug!(series = %dataset.name, points = dataset.data.len(), "Drew series");
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font((family, style.label_font_size))
            .draw()
            .map_err(plot_error("failed to draw legend"))?;

        root.present().map_err(plot_error("failed to finish drawing"))?;
        Ok(())
    }
}

impl GraphRenderer for LineChartRenderer {
    fn render_to_bytes(&self, config: &GraphConfig, datasets: &[DataSet]) -> Result<Vec<u8>> {
        let (width, height) = (config.width, config.height);
        let mut buffer = vec![0_u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            self.draw(&root, config, datasets)?;
        }

        let image = image::RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| TrackerError::graph("pixel buffer does not match chart size"))?;
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
            .map_err(plot_error("failed to encode PNG"))?;

        Ok(png)
    }
}
