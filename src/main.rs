//! edgeserve
//!
//! A single-port HTTP edge server built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!                     │                  EDGESERVE                    │
//!                     │                                               │
//!   Client Request    │  ┌──────────┐      ┌─────────────────┐       │
//!   ──────────────────┼─▶│   http   │─────▶│  routing table  │       │
//!                     │  │  server  │      │ (longest prefix)│       │
//!                     │  └──────────┘      └───────┬─────────┘       │
//!                     │                            │                  │
//!                     │            ┌───────────────┼───────────────┐ │
//!                     │            ▼               ▼               ▼ │
//!                     │     ┌────────────┐  ┌────────────┐  ┌──────┐ │
//!                     │     │  reverse   │  │  static +  │  │ 302  │ │
//!                     │     │   proxy    │  │  fallback  │  │      │ │
//!                     │     └─────┬──────┘  └────────────┘  └──────┘ │
//!                     │           │                                   │
//!                     └───────────┼───────────────────────────────────┘
//!                                 ▼
//!                          Origin servers
//! ```

// Core subsystems
pub mod config;
pub mod http;
pub mod routing;
pub mod spa;

// Cross-cutting concerns
pub mod observability;

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use crate::config::load_config;
use crate::http::EdgeServer;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "edgeserve", about = "SPA edge server with reverse proxying")]
struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "./edgeserve.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Configuration errors are startup-fatal; report before tracing exists.
    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };

    observability::logging::init(&config.observability.log_level);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        static_root = %config.static_site.path,
        proxy_routes = config.proxies.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = EdgeServer::new(&config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
