use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use brainstorm_application::SessionService;
use brainstorm_core::config::AppConfig;
use brainstorm_core::generator::IdeaGenerator;
use brainstorm_infrastructure::{BrainstormPaths, JsonFileBrainstormRepository};
use tokio::net::TcpListener;

use crate::api;
use crate::app::AppState;

/// Everything needed to serve requests, built from configuration.
pub struct AppBootstrap {
    pub app_state: AppState,
}

impl AppBootstrap {
    /// Resolves the data directory, opens the store and wires the service.
    ///
    /// `storage.data_dir` wins over the directory resolved by `paths`.
    pub async fn build(config: &AppConfig, paths: &BrainstormPaths) -> Result<Self> {
        let data_dir = match &config.storage.data_dir {
            Some(dir) => dir.clone(),
            None => paths.data_dir()?,
        };
        tracing::info!("[Bootstrap] Data directory: {}", data_dir.display());

        let repository = JsonFileBrainstormRepository::open(&data_dir)
            .await
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;

        let generator = match config.generator.seed {
            Some(seed) => {
                tracing::info!("[Bootstrap] Idea generator seeded with {}", seed);
                IdeaGenerator::seeded(seed)
            }
            None => IdeaGenerator::random(),
        };

        let session_service = SessionService::new(Arc::new(repository), generator);
        let app_state = AppState::new(session_service, &config.server.api_prefix);
        tracing::info!(
            "[Bootstrap] API mounted at {}",
            if app_state.api_prefix.is_empty() { "/" } else { &*app_state.api_prefix }
        );

        Ok(Self { app_state })
    }
}

/// Serves `state` on `listener` until `shutdown` resolves, then drains
/// in-flight requests.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!("[Server] Listening on http://{}", addr);

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    tracing::info!("[Server] Stopped");
    Ok(())
}
