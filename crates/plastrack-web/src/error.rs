//! Mapping of tracker failures onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use plastrack_common::TrackerError;
use thiserror::Error;
use tracing::error;

/// Errors raised while handling a request.
#[derive(Error, Debug)]
pub enum WebError {
    /// A core operation failed.
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// A blocking task panicked or was cancelled.
    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl WebError {
    /// Status code the failure is reported with.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Tracker(TrackerError::InvalidNumber { .. }) => StatusCode::BAD_REQUEST,
            Self::Tracker(_) | Self::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        let category = match &self {
            Self::Tracker(e) => e.category(),
            Self::Join(_) => "task",
        };
        error!(status = status.as_u16(), category, error = %self, "Request failed");
        (status, self.to_string()).into_response()
    }
}

/// Runs a blocking core operation off the async executor.
pub async fn run_blocking<T, F>(operation: F) -> Result<T, WebError>
where
    F: FnOnce() -> plastrack_common::Result<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(operation).await??)
}
