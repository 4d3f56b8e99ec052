//! Round-robin reverse-proxy load balancer.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │                  BALANCER                     │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐   ┌──────────────┐              │
//!   ──────────────────┼─▶│  http   │──▶│load_balancer │              │
//!                      │  │ server  │   │ round robin  │              │
//!                      │  └─────────┘   └──────┬───────┘              │
//!                      │                        │                      │
//!   Client Response    │  ┌─────────┐          ▼                      │
//!   ◀──────────────────┼──│ http    │◀── selected backend ◀───────────┼── Backend
//!                      │  │ client  │                                  │    Servers
//!                      │  └─────────┘                                  │
//!                      │                                               │
//!                      │  ┌─────────────────────────────────────────┐  │
//!                      │  │          Cross-Cutting Concerns          │  │
//!                      │  │  config · health probes · event log ·    │  │
//!                      │  │  metrics · lifecycle                     │  │
//!                      │  └─────────────────────────────────────────┘  │
//!                      └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rotary::config;
use rotary::health::passive::PassiveProber;
use rotary::http::HttpServer;
use rotary::lifecycle::{signals, Shutdown};
use rotary::observability::logging::LogSink;
use rotary::observability::metrics;

/// Command line options.
#[derive(Parser, Debug)]
#[command(name = "rotary", about = "Round-robin reverse-proxy load balancer")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(long, default_value = "./config.json")]
    config: std::path::PathBuf,

    /// Listening port; overrides `proxy.port` from the configuration.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rotary=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("rotary v0.1.0 starting");

    let cli = Cli::parse();
    let mut config = config::load_config(&cli.config)?;
    if let Some(port) = cli.port {
        config.proxy.port = port.to_string();
    }

    tracing::info!(
        port = %config.proxy.port,
        backends = config.backends.len(),
        health_mode = ?config.health.mode,
        "configuration loaded"
    );

    let shutdown = Shutdown::new();

    // Event pipeline: every subsystem shares the sink, one writer drains
    // to stdout.
    let (sink, writer) = LogSink::new(config.log.buffer, tokio::io::stdout());
    let writer_shutdown = shutdown.subscribe();
    let writer_task = tokio::spawn(writer.run(writer_shutdown));

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(&config, sink.clone())?;

    if config.health.mode.passive_enabled() {
        let prober = PassiveProber::new(server.pool(), config.health.clone(), sink.clone());
        let prober_shutdown = shutdown.subscribe();
        tokio::spawn(prober.run(prober_shutdown));
    }

    let signal_coordinator = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_coordinator.trigger();
    });

    let bind_address = format!("0.0.0.0:{}", config.proxy.port);
    let listener = TcpListener::bind(&bind_address).await?;

    let server_shutdown = shutdown.subscribe();
    server.run(listener, server_shutdown).await?;

    // The server has stopped; make sure background tasks exit and the
    // event queue drains before the process does.
    shutdown.trigger();
    let _ = writer_task.await;

    tracing::info!("shutdown complete");
    Ok(())
}
