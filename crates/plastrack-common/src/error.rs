//! Error types and utilities for the tracker.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed error used as the source of wrapped failures.
pub type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Main error type for tracker operations.
#[derive(Error, Debug)]
pub enum TrackerError {
    /// The backing record store does not exist when a read is attempted.
    #[error("Record store unavailable: {}", path.display())]
    StoreUnavailable {
        /// Path of the missing store.
        path: PathBuf,
    },

    /// A record date could not be coerced to a calendar date.
    #[error("Invalid date: {value:?}")]
    InvalidDate {
        /// The offending raw value.
        value: String,
    },

    /// A plastic usage amount could not be coerced to a number.
    #[error("Invalid number: {value:?}")]
    InvalidNumber {
        /// The offending raw value.
        value: String,
    },

    /// There are no records to plot.
    #[error("No data available")]
    NoData,

    /// Reading or writing the record store failed.
    #[error("Storage error: {message}")]
    Storage {
        /// What failed.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxedSource>,
    },

    /// Chart rendering or image encoding failed.
    #[error("Graph error: {message}")]
    Graph {
        /// What failed.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxedSource>,
    },

    /// Configuration related errors.
    #[error("Configuration error: {message}")]
    Config {
        /// What failed.
        message: String,
        /// Underlying cause, if any.
        #[source]
        source: Option<BoxedSource>,
    },

    /// I/O related errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    /// Create a store-unavailable error for the given path.
    pub fn store_unavailable(path: impl Into<PathBuf>) -> Self {
        Self::StoreUnavailable { path: path.into() }
    }

    /// Create an invalid-date error carrying the raw value.
    pub fn invalid_date(value: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
        }
    }

    /// Create an invalid-number error carrying the raw value.
    pub fn invalid_number(value: impl Into<String>) -> Self {
        Self::InvalidNumber {
            value: value.into(),
        }
    }

    /// Create a new storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new storage error with source.
    pub fn storage_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Storage {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error.
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source.
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error means "nothing to show" rather than a fault.
    ///
    /// The web layer answers these with a plain message instead of an
    /// error status.
    pub const fn is_no_data(&self) -> bool {
        matches!(self, Self::StoreUnavailable { .. } | Self::NoData)
    }

    /// Short category name used in log fields.
    pub const fn category(&self) -> &'static str {
        match self {
            Self::StoreUnavailable { .. } => "store_unavailable",
            Self::InvalidDate { .. } => "invalid_date",
            Self::InvalidNumber { .. } => "invalid_number",
            Self::NoData => "no_data",
            Self::Storage { .. } => "storage",
            Self::Graph { .. } => "graph",
            Self::Config { .. } => "config",
            Self::Io(_) => "io",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_messages() {
        let err = TrackerError::store_unavailable("plastic_usage.csv");
        assert_eq!(err.to_string(), "Record store unavailable: plastic_usage.csv");

        let err = TrackerError::invalid_date("not-a-date");
        assert_eq!(err.to_string(), "Invalid date: \"not-a-date\"");

        let err = TrackerError::invalid_number("twelve");
        assert_eq!(err.to_string(), "Invalid number: \"twelve\"");

        assert_eq!(TrackerError::NoData.to_string(), "No data available");
    }

    #[test]
    fn test_source_is_preserved() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err = TrackerError::storage_with_source("failed to rewrite store", io);

        assert_eq!(err.to_string(), "Storage error: failed to rewrite store");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("disk full"));
        assert!(TrackerError::graph("no backend").source().is_none());
    }

    #[test]
    fn test_no_data_classification() {
        assert!(TrackerError::NoData.is_no_data());
        assert!(TrackerError::store_unavailable("x.csv").is_no_data());
        assert!(!TrackerError::invalid_date("x").is_no_data());
        assert!(!TrackerError::invalid_number("x").is_no_data());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TrackerError = io.into();
        assert_eq!(err.category(), "io");
    }
}
