//! Aggregate tables route.

use crate::error::{run_blocking, WebError};
use crate::pages;
use crate::router::AppState;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use plastrack_common::TrackerError;
use plastrack_graphs::summarize;

/// Plain-text reply when there is no store to read.
pub const NO_DATA_TO_ANALYZE: &str = "No data available to analyze.";

/// Shows totals per community and per community-month.
pub async fn analyze(State(state): State<AppState>) -> Result<Response, WebError> {
    let store = state.store.clone();
    let loaded = run_blocking(move || store.load()).await;

    let records = match loaded {
        Ok(records) => records,
        Err(WebError::Tracker(TrackerError::StoreUnavailable { .. })) => {
            return Ok(NO_DATA_TO_ANALYZE.into_response());
        }
        Err(e) => return Err(e),
    };

    let summary = summarize(&records)?;
    Ok(Html(pages::analyze_page(&summary)).into_response())
}
