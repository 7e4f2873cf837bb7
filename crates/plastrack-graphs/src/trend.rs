//! Per-community usage trend chart.

use crate::renderer::{GraphRenderer, LineChartRenderer};
use crate::types::{DataPoint, DataSet, GraphConfig};
use crate::utils::date_to_x_value;
use chrono::NaiveDate;
use parking_lot::Mutex;
use plastrack_common::{Result, TrackerError, UsageRecord};
use plastrack_config::ChartConfig;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// One community's measurements, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    /// Community name, used as the legend label.
    pub community: String,
    /// `(date, kg)` pairs.
    pub points: Vec<(NaiveDate, f64)>,
}

impl From<&TrendSeries> for DataSet {
    fn from(series: &TrendSeries) -> Self {
        Self {
            name: series.community.clone(),
            data: series
                .points
                .iter()
                .map(|&(date, kg)| DataPoint {
                    x: date_to_x_value(date),
                    y: kg,
                })
                .collect(),
        }
    }
}

/// Groups records into one series per community.
///
/// Communities keep the order in which they first appear; points keep the
/// input order within each community. Fails with `NoData` on an empty
/// input and with `InvalidDate` on any malformed date.
pub fn build_trend_series(records: &[UsageRecord]) -> Result<Vec<TrendSeries>> {
    if records.is_empty() {
        return Err(TrackerError::NoData);
    }

    let mut series: Vec<TrendSeries> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let date = record.parsed_date()?;
        let slot = *index.entry(record.community.as_str()).or_insert_with(|| {
            series.push(TrendSeries {
                community: record.community.clone(),
                points: Vec::new(),
            });
            series.len() - 1
        });
        series[slot].points.push((date, record.plastic_used_kg));
    }

    Ok(series)
}

/// Renders the trend chart to a fixed artifact path.
///
/// Every render replaces the artifact; concurrent renders through one
/// handle are serialised and the last one wins.
pub struct TrendChart<R = LineChartRenderer> {
    config: GraphConfig,
    output_path: PathBuf,
    renderer: R,
    render_lock: Mutex<()>,
}

impl TrendChart<LineChartRenderer> {
    /// Creates a trend chart from the chart settings.
    pub fn from_config(chart: &ChartConfig) -> Self {
        Self::with_renderer(
            GraphConfig::trend(chart),
            chart.output_path.clone(),
            LineChartRenderer::new(),
        )
    }
}

impl<R: GraphRenderer> TrendChart<R> {
    /// Creates a trend chart with an explicit renderer.
    pub fn with_renderer(
        config: GraphConfig,
        output_path: impl Into<PathBuf>,
        renderer: R,
    ) -> Self {
        Self {
            config,
            output_path: output_path.into(),
            renderer,
            render_lock: Mutex::new(()),
        }
    }

    /// Path the artifact is written to.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Graph configuration used for every render.
    pub const fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Plots every community's usage over time and writes the artifact.
    #[instrument(skip(self, records), fields(records = records.len(), path = %self.output_path.display()))]
    pub fn render_trend(&self, records: &[UsageRecord]) -> Result<PathBuf> {
        let series = build_trend_series(records)?;
        let datasets: Vec<DataSet> = series.iter().map(DataSet::from).collect();

        let _guard = self.render_lock.lock();
        self.renderer
            .render_to_file(&self.config, &datasets, &self.output_path)?;

        info!(series = datasets.len(), "Rendered usage trend chart");
        Ok(self.output_path.clone())
    }
}

impl<R> std::fmt::Debug for TrendChart<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrendChart")
            .field("title", &self.config.title)
            .field("output_path", &self.output_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plastrack_common::test_utils::{create_temp_dir, record_fixtures};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct RecordingRenderer {
        calls: AtomicUsize,
        seen: parking_lot::Mutex<Vec<DataSet>>,
    }

    impl GraphRenderer for Arc<RecordingRenderer> {
        fn render_to_bytes(&self, _config: &GraphConfig, datasets: &[DataSet]) -> Result<Vec<u8>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            *self.seen.lock() = datasets.to_vec();
            Ok(format!("render {call}").into_bytes())
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_series_follow_first_appearance() {
        let records = vec![
            UsageRecord::new("Lakeside", "2024-01-20", 5.0),
            UsageRecord::new("Riverside", "2024-01-15", 12.5),
            UsageRecord::new("Lakeside", "2024-01-02", 1.0),
            UsageRecord::new("Aspen", "2024-03-01", 2.0),
        ];

        let series = build_trend_series(&records).unwrap();
        let names: Vec<&str> = series.iter().map(|s| s.community.as_str()).collect();
        assert_eq!(names, vec!["Lakeside", "Riverside", "Aspen"]);

        assert_eq!(
            series[0].points,
            vec![(date("2024-01-20"), 5.0), (date("2024-01-02"), 1.0)]
        );
    }

    #[test]
    fn test_empty_records_have_no_data() {
        assert!(matches!(build_trend_series(&[]), Err(TrackerError::NoData)));
    }

    #[test]
    fn test_malformed_date_fails_series() {
        let mut records = record_fixtures::riverside_lakeside();
        records.push(record_fixtures::malformed_date_record());
        assert!(matches!(
            build_trend_series(&records),
            Err(TrackerError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_dataset_conversion_uses_day_numbers() {
        let series = TrendSeries {
            community: "Riverside".to_string(),
            points: vec![(date("2024-01-15"), 12.5), (date("2024-01-16"), 3.0)],
        };
        let dataset = DataSet::from(&series);

        assert_eq!(dataset.name, "Riverside");
        assert!((dataset.data[1].x - dataset.data[0].x - 1.0).abs() < f64::EPSILON);
        assert!((dataset.data[0].y - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_render_trend_writes_artifact_and_overwrites() {
        let dir = create_temp_dir();
        let path = dir.path().join("static").join("plot.png");
        let renderer = Arc::new(RecordingRenderer::default());
        let chart = TrendChart::with_renderer(GraphConfig::default(), &path, Arc::clone(&renderer));

        let written = chart
            .render_trend(&record_fixtures::riverside_lakeside())
            .unwrap();
        assert_eq!(written, path);
        assert_eq!(std::fs::read(&path).unwrap(), b"render 1");

        let seen = renderer.seen.lock().clone();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].name, "Riverside");
        assert_eq!(seen[0].data.len(), 2);
        assert_eq!(seen[1].name, "Lakeside");

        chart
            .render_trend(&record_fixtures::daily_series("Hillcrest", 3))
            .unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"render 2");
    }

    #[test]
    fn test_render_trend_without_records_leaves_artifact_alone() {
        let dir = create_temp_dir();
        let path = dir.path().join("plot.png");
        std::fs::write(&path, b"previous").unwrap();
        let renderer = Arc::new(RecordingRenderer::default());
        let chart = TrendChart::with_renderer(GraphConfig::default(), &path, Arc::clone(&renderer));

        assert!(matches!(chart.render_trend(&[]), Err(TrackerError::NoData)));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(std::fs::read(&path).unwrap(), b"previous");
    }

    #[test]
    fn test_from_config_uses_fixed_labels() {
        let chart = TrendChart::from_config(&ChartConfig::default());

        assert_eq!(chart.config().title, "Plastic Usage Trends");
        assert_eq!(chart.config().x_label, "Date");
        assert_eq!(chart.config().y_label, "Plastic Used (kg)");
        assert_eq!(chart.config().width, 1000);
        assert_eq!(chart.output_path(), Path::new("static/plot.png"));
    }
}
