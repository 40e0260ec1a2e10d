//! urlrouter service.
//!
//! ```text
//!     Client Request ──▶ listener ──▶ axum (request id, trace, timeout)
//!                                          │
//!                                          ▼
//!                                   route table lookup ──▶ 404
//!                                          │
//!                                          ▼
//!     Client Response ◀──────────────── handler (reads Params)
//!
//!     config file ──▶ watcher ──▶ rebuilt route table swapped in
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use urlrouter::config::{load_config, validate_config, ConfigError, ConfigWatcher, RouterConfig};
use urlrouter::observability::{logging, metrics};
use urlrouter::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "urlrouter")]
#[command(about = "Serve configured routes through the method/path trie router", long_about = None)]
struct Cli {
    /// Route configuration file (TOML). Watched for changes.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_tracing(&config.observability.log_level)?;
    tracing::info!("urlrouter v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // The watcher handle must outlive the server.
    let (_watcher, config_updates) = match &cli.config {
        Some(path) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        None => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.subscribe();
    let signal = Arc::clone(&shutdown);
    tokio::spawn(async move { signal.trigger_on_ctrl_c().await });

    let server = HttpServer::new(config)?;
    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
