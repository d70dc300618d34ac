//! Serve command - runs the HTTP API

use std::net::SocketAddr;

use clap::Args;
use tokio::net::TcpListener;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::api::create_router;
use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::StorageType;

/// Flags for `serve`; each one overrides the loaded configuration
#[derive(Debug, Clone, Default, Args)]
pub struct ServeArgs {
    /// Configuration file, replaces `config/local`
    #[arg(long)]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind
    #[arg(long)]
    pub port: Option<u16>,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Storage backend
    #[arg(long, value_enum)]
    pub storage: Option<StorageType>,
}

impl ServeArgs {
    fn apply(self, config: &mut AppConfig) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        if let Some(storage) = self.storage {
            config.storage.backend = storage;
        }
    }
}

/// Run the API server until a shutdown signal arrives
pub async fn run(args: ServeArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let (mut config, load_error) = load_config(args.config.as_deref())?;
    args.apply(&mut config);

    logging::init_logging(&config.logging)?;

    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load configuration, using defaults");
    }

    let state = crate::create_app_state(&config).await?;
    let app = create_router(state);

    let addr = build_socket_addr(&config)?;
    info!(storage = %config.storage.backend, "Starting server on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    let shutdown = CancellationToken::new();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.clone().cancelled_owned())
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => {
            result?;
            return Ok(());
        }
        _ = shutdown_signal() => shutdown.cancel(),
    }

    let grace = config.server.shutdown_timeout();
    match tokio::time::timeout(grace, server).await {
        Ok(result) => result?,
        Err(_) => warn!(
            timeout_secs = grace.as_secs(),
            "Graceful shutdown timed out, dropping in-flight requests"
        ),
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Load the layered configuration. An explicit `--config` file must load;
/// otherwise a failure falls back to defaults and is handed back for logging
/// once the subscriber is installed.
fn load_config(path: Option<&str>) -> anyhow::Result<(AppConfig, Option<config::ConfigError>)> {
    settle_config(path.is_some(), AppConfig::load(path))
}

fn settle_config(
    explicit: bool,
    loaded: Result<AppConfig, config::ConfigError>,
) -> anyhow::Result<(AppConfig, Option<config::ConfigError>)> {
    match loaded {
        Ok(config) => Ok((config, None)),
        Err(e) if explicit => Err(e.into()),
        Err(e) => Ok((AppConfig::default(), Some(e))),
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
