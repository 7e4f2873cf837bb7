//! Server lifecycle: preparation, binding and serving.

use crate::error::ServerResult;
use axum::Router;
use plastrack_config::Config;
use plastrack_graphs::font_available;
use plastrack_web::{create_router, AppState};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Main server structure.
#[derive(Debug)]
pub struct TrackerServer {
    config: Arc<Config>,
    state: AppState,
}

impl TrackerServer {
    /// Creates a new server instance from a validated configuration.
    pub fn new(config: Config) -> Self {
        let state = AppState::from_config(&config);
        Self {
            config: Arc::new(config),
            state,
        }
    }

    /// Creates the static directory and an empty record store if missing.
    pub fn prepare(&self) -> ServerResult<()> {
        std::fs::create_dir_all(&self.config.server.static_dir)?;
        self.state.store.initialize()?;
        if !font_available(&self.config.chart.font_family) {
            warn!(
                font = %self.config.chart.font_family,
                "Chart font not found; /plot requests will fail until it is installed"
            );
        }
        info!(
            store = %self.state.store.location(),
            static_dir = %self.config.server.static_dir.display(),
            "Prepared record store and static directory"
        );
        Ok(())
    }

    /// Router serving every tracker route.
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Binds the configured address and serves until Ctrl-C.
    pub async fn start(&self) -> ServerResult<()> {
        let addr = self.config.server.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Serves on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(address = %listener.local_addr()?, "Plastic usage tracker listening");
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("Server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
