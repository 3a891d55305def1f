//! modpanel Server
//!
//! REST API backend for a module's web UI: device information, the
//! `otomatis`/`statis` mode stored in the module's `config.conf`, and an
//! about descriptor.
//!
//! # Configuration
//!
//! Settings are read from environment variables (`MODULE_NAME`,
//! `MODULE_ROOT`, `PORT`, `DEVICE_*`, `DEV_*`, `MODULE_DESC`,
//! `COMMAND_TIMEOUT_SECS`). Command-line flags take precedence over the
//! environment.

mod api;

use anyhow::Result;
use api::AppState;
use clap::Parser;
use modpanel_core::Settings;
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;
use tracing::info;

/// modpanel API Server
#[derive(Parser, Debug)]
#[command(name = "modpaneld")]
#[command(version, about = "Module Controller API Server", long_about = None)]
struct Args {
    /// Server bind address
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// Server port (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Module name (overrides MODULE_NAME)
    #[arg(short, long)]
    module_name: Option<String>,

    /// Directory containing installed modules (overrides MODULE_ROOT)
    #[arg(long)]
    module_root: Option<PathBuf>,

    /// Per-command timeout in seconds (overrides COMMAND_TIMEOUT_SECS)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    command_timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Apply command-line overrides on top of environment settings
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(ref name) = self.module_name {
            settings.identity.name = name.clone();
        }
        if let Some(ref root) = self.module_root {
            settings.identity.module_root = root.clone();
        }
        if let Some(secs) = self.command_timeout {
            settings.command_timeout = Duration::from_secs(secs);
        }
        settings
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.verbose);

    info!("modpanel server starting...");

    let settings = args.apply(Settings::from_env()?);
    info!("Module: {}", settings.identity.name);
    info!("Configuration file: {}", settings.config_path().display());
    info!("Command timeout: {:?}", settings.command_timeout);

    let bind_addr = format!("{}:{}", args.bind, settings.port);

    let app_state = AppState::new(settings);
    let app = api::create_router(app_state);

    info!("Starting server on {}", bind_addr);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("modpanel API Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

/// Initialize tracing subscriber for logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
