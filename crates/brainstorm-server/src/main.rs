use std::path::PathBuf;

use anyhow::{Context, Result};
use brainstorm_infrastructure::{BrainstormPaths, ConfigService};
use brainstorm_server::app::{self, AppBootstrap};
use clap::Parser;
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "brainstorm")]
#[command(about = "Brainstorm - topic-seeded idea sessions with voting", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Root for config, data and logs instead of the platform directories
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (0 picks a free port)
    #[arg(long, short)]
    port: Option<u16>,

    /// Directory holding sessions.json and ideas.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "brainstorm_infrastructure=trace"
    #[arg(long)]
    log_level: Option<String>,

    /// Seed for reproducible idea generation
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = BrainstormPaths::new(cli.base_dir.as_deref());

    let config_service = match &cli.config {
        Some(path) => ConfigService::new(path),
        None => ConfigService::from_paths(&paths)?,
    };
    let mut config = config_service.load();

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(data_dir) = cli.data_dir {
        config.storage.data_dir = Some(data_dir);
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(seed) = cli.seed {
        config.generator.seed = Some(seed);
    }

    let logs_dir = paths.logs_dir().ok();
    let _log_guard = app::init_logging(&config.logging, logs_dir.as_deref())?;
    tracing::info!("[Bootstrap] Config file: {}", config_service.path().display());

    let bootstrap = AppBootstrap::build(&config, &paths).await?;

    let bind = (config.server.host.as_str(), config.server.port);
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {}:{}", config.server.host, config.server.port))?;

    app::serve(listener, bootstrap.app_state, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("[Server] Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("[Server] Shutdown requested");
}
