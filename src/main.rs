//! intercooler-demo
//!
//! A small server exercising the intercooler.js layers.
//!
//! # Request Flow
//!
//! ```text
//!   client ──▶ TraceLayer ──▶ TimeoutLayer ──▶ intercooler_data ──▶ ic_redirect ──▶ handler
//!                                               (admit, strip ic-*)   (3xx → 200 +     │
//!                                                                      X-IC-Redirect)  │
//!   client ◀──────────────────────────────────────────────────────────────────────────┘
//!                                   (+ X-IC-PushURL / X-IC-Select-From-Response per route)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use intercooler_helpers::config::{load_config, IntercoolerConfig};
use intercooler_helpers::lifecycle::signals::shutdown_on_ctrl_c;
use intercooler_helpers::observability::init_logging;
use intercooler_helpers::{DemoServer, Shutdown};

#[derive(Parser)]
#[command(name = "intercooler-demo")]
#[command(about = "Demo server for the intercooler.js helpers", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
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
        None => IntercoolerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.logging)?;

    tracing::info!("intercooler-demo v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        max_form_bytes = config.admission.max_form_bytes,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        shutdown_on_ctrl_c(&signal_shutdown).await;
    });

    let server = DemoServer::new(config)?;
    server.run(listener, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
