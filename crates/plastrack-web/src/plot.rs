//! Trend chart route.

use crate::error::{run_blocking, WebError};
use crate::pages;
use crate::router::AppState;
use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
};
use tracing::debug;

/// Plain-text reply when there is nothing to plot.
pub const NO_DATA_TO_PLOT: &str = "No data available to plot.";

/// Renders the trend chart and shows it.
pub async fn plot(State(state): State<AppState>) -> Result<Response, WebError> {
    let store = state.store.clone();
    let chart = state.chart.clone();
    let rendered = run_blocking(move || {
        let records = store.load()?;
        chart.render_trend(&records)
    })
    .await;

    match rendered {
        Ok(path) => {
            debug!(path = %path.display(), "Chart artifact ready");
            Ok(Html(pages::plot_page(&state.chart_url)).into_response())
        }
        Err(WebError::Tracker(e)) if e.is_no_data() => Ok(NO_DATA_TO_PLOT.into_response()),
        Err(e) => Err(e),
    }
}
