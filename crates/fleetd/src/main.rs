//! fleetd — the Fleetboard aggregator daemon.
//!
//! Single binary that assembles the aggregator subsystems:
//! - Service registry (TOML config)
//! - Status store
//! - Sweeper (initial sweep + optional periodic sweeps)
//! - REST API
//!
//! # Usage
//!
//! ```text
//! fleetd run --config fleetboard.toml --port 8080
//! ```
//!
//! # Config
//!
//! ```toml
//! probe_timeout_ms = 5000
//! sweep_interval_secs = 30
//!
//! [[services]]
//! key = "pricing"
//! name = "Pricing API"
//! url = "http://pricing.internal:8080"
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::info;

#[derive(Parser)]
#[command(name = "fleetd", about = "Fleetboard aggregator daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the aggregator: load the fleet config, sweep, serve the API.
    Run {
        /// Path to the fleet config file.
        #[arg(long, default_value = "fleetboard.toml")]
        config: PathBuf,

        /// Port to listen on.
        #[arg(long, default_value = "8080")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fleetd=debug,fleetboard=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Run { config, port } => run(config, port).await,
    }
}

async fn run(config_path: PathBuf, port: u16) -> anyhow::Result<()> {
    info!("Fleetboard aggregator starting");

    // ── Initialize subsystems ──────────────────────────────────

    let config = fleetboard_registry::FleetConfig::load(&config_path)?;
    let registry = config.build_registry()?;
    info!(services = registry.len(), "service registry built");

    let store = fleetboard_state::StatusStore::new(&registry);
    info!("status store initialized");

    let sweeper = fleetboard_health::Sweeper::new(registry, store.clone())
        .with_timeout(config.probe_timeout());
    info!(timeout_ms = config.probe_timeout_ms, "sweeper initialized");

    // ── Shutdown signal ────────────────────────────────────────

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Start background tasks ─────────────────────────────────

    // Initial sweep so the dashboard has data as soon as it loads.
    let initial = sweeper.clone();
    tokio::spawn(async move {
        initial.check_all().await;
    });

    // Periodic sweeper, when configured.
    let sweeper_handle = config.sweep_interval().map(|interval| {
        let periodic = sweeper.clone();
        let shutdown = shutdown_rx.clone();
        tokio::spawn(async move {
            periodic.run(interval, shutdown).await;
        })
    });

    // ── Start API server ───────────────────────────────────────

    let router = fleetboard_api::build_router(store, sweeper);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!(%addr, "API server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Graceful shutdown on Ctrl-C.
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    server.await?;

    // Wait for background tasks.
    if let Some(handle) = sweeper_handle {
        let _ = handle.await;
    }

    info!("Fleetboard aggregator stopped");
    Ok(())
}
