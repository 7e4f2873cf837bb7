//! Graph utility functions and helpers.

use crate::types::DataSet;
use chrono::{Datelike, NaiveDate};
use plastrack_common::{format_record_date, Result, TrackerError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Axis bounds as `(x_min, x_max, y_min, y_max)`.
pub type DataRanges = (f64, f64, f64, f64);

/// Converts a calendar date to a continuous x-axis value (days from CE).
pub fn date_to_x_value(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Converts an x-axis value back to the nearest calendar date.
#[allow(clippy::cast_possible_truncation)]
pub fn x_value_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x < f64::from(i32::MIN) || x > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// Tick label for an x-axis value.
pub fn format_x_label(x: &f64) -> String {
    x_value_to_date(*x).map(format_record_date).unwrap_or_default()
}

/// Calculates axis bounds over every dataset.
///
/// The x span is padded by one day on each side when all points share a
/// date, and by 2% otherwise. The y axis starts at zero unless a value is
/// negative, with 10% headroom above the largest value.
pub fn calculate_data_ranges(datasets: &[DataSet]) -> DataRanges {
    let points = || datasets.iter().flat_map(|dataset| dataset.data.iter());
    if points().next().is_none() {
        return (0.0, 1.0, 0.0, 1.0);
    }

    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (0.0_f64, 0.0_f64);
    for point in points() {
        x_min = x_min.min(point.x);
        x_max = x_max.max(point.x);
        y_min = y_min.min(point.y);
        y_max = y_max.max(point.y);
    }

    let x_padding = if x_max > x_min {
        (x_max - x_min) * 0.02
    } else {
        1.0
    };
    let y_top = if y_max > 0.0 { y_max * 1.1 } else { 1.0 };
    let y_bottom = if y_min < 0.0 { y_min * 1.1 } else { 0.0 };

    (x_min - x_padding, x_max + x_padding, y_bottom, y_top)
}

/// Writes `bytes` to `path` through a temporary file and a rename, so a
/// reader sees either the previous content or the new one.
pub fn write_atomically(path: &Path, bytes: &[u8]) -> Result<()> {
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    fs::create_dir_all(&directory)?;

    let mut temp = NamedTempFile::new_in(&directory)?;
    std::io::Write::write_all(&mut temp, bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| {
        TrackerError::graph_with_source(format!("failed to replace {}", path.display()), e.error)
    })?;
    Ok(())
}
