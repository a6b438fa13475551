//! Message dispatcher server.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────────┐
//!                       │                 MESSAGE DISPATCHER                   │
//!                       │                                                      │
//!   Client Request      │  ┌─────────┐   ┌─────────────┐   ┌───────────────┐   │
//!   ────────────────────┼─▶│  http   │──▶│ conditional │──▶│    front      │   │
//!                       │  │ server  │   │     GET     │   │  controller   │   │
//!                       │  └─────────┘   └─────────────┘   └───┬───────┬───┘   │
//!                       │                                 X.wsdl│       │msg   │
//!                       │                                      ▼       ▼       │
//!                       │                            ┌──────────┐ ┌──────────┐ │
//!                       │                            │   wsdl   │ │ receiver │ │
//!                       │                            │ handler  │ │ handler  │ │
//!                       │                            └──────────┘ └──────────┘ │
//!                       │                                                      │
//!                       │  startup: config → registry → strategy resolution    │
//!                       └──────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use clap::Parser;
use tokio::net::TcpListener;

use message_dispatcher::config::{load_config, DispatcherConfig};
use message_dispatcher::http::HttpServer;
use message_dispatcher::lifecycle::{signals, startup, Shutdown};
use message_dispatcher::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "message-dispatcher")]
#[command(about = "Front controller for an HTTP message service", long_about = None)]
struct Cli {
    /// Configuration file (TOML). Defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Rewrite relative WSDL locations to the request URL.
    #[arg(long)]
    transform_wsdl_locations: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DispatcherConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if cli.transform_wsdl_locations {
        config.dispatcher.transform_wsdl_locations = true;
    }

    logging::init_logging(&config.observability)?;
    tracing::info!("message-dispatcher v{} starting", env!("CARGO_PKG_VERSION"));

    let base_dir = cli
        .config
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or_else(|| Path::new("."));

    let controller = match startup::bootstrap(&config, base_dir) {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!(error = %e, "Front controller initialization failed");
            return Err(e.into());
        }
    };

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        service_path = %config.dispatcher.service_path,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    tokio::spawn(signals::wait_for_signal(shutdown.clone()));

    let server = HttpServer::new(&config, controller);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
