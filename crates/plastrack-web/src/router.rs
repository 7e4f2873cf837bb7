//! Router setup and shared request state.

use axum::{routing::get, Router};
use plastrack_config::Config;
use plastrack_graphs::TrendChart;
use plastrack_store::{CsvRecordStore, RecordStore};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

/// Shared application state for every route.
#[derive(Clone)]
pub struct AppState {
    /// Usage record persistence.
    pub store: Arc<dyn RecordStore>,
    /// Trend chart renderer writing the static artifact.
    pub chart: Arc<TrendChart>,
    /// Public URL of the chart artifact.
    pub chart_url: String,
    /// Directory served under the static prefix.
    pub static_dir: PathBuf,
    /// URL prefix the static directory is mounted at.
    pub static_url_prefix: String,
}

impl AppState {
    /// Builds the state from a validated configuration.
    pub fn from_config(config: &Config) -> Self {
        let chart_url = config.chart_url().unwrap_or_else(|| {
            format!("{}/plot.png", config.server.static_url_prefix.trim_end_matches('/'))
        });

        Self {
            store: Arc::new(CsvRecordStore::new(config.storage.data_file.clone())),
            chart: Arc::new(TrendChart::from_config(&config.chart)),
            chart_url,
            static_dir: config.server.static_dir.clone(),
            static_url_prefix: config.server.static_url_prefix.clone(),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.location())
            .field("chart", &self.chart)
            .field("chart_url", &self.chart_url)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

/// Create the tracker router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.static_dir);
    let prefix = state.static_url_prefix.trim_end_matches('/').to_string();

    Router::new()
        .route("/", get(crate::index::index))
        .route("/add", get(crate::add::add_form).post(crate::add::add_record))
        .route("/analyze", get(crate::analyze::analyze))
        .route("/plot", get(crate::plot::plot))
        .nest_service(&prefix, static_files)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
