//! Application-wide error types using thiserror.

use plastrack_common::TrackerError;
use plastrack_config::ConfigError;

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Store, chart, or logging failure.
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the server application.
pub type ServerResult<T> = Result<T, ServerError>;
