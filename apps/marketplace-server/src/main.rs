//! Marketplace server: configuration, logging, database and HTTP wiring

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use config::{AppConfig, LoggingConfig};
use marketplace_service::MarketplaceModule;
use sea_orm::{ConnectOptions, Database};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// B2B marketplace procurement API
#[derive(Parser, Debug)]
#[command(name = "marketplace-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config/marketplace.yaml")]
    config: PathBuf,

    /// Apply migrations and seed permissions, then exit
    #[arg(long)]
    migrate_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = AppConfig::load(&args.config)?;
    init_logging(&cfg.logging);

    let mut options = ConnectOptions::new(cfg.database_url.clone());
    options.sqlx_logging(false);
    let db = Database::connect(options)
        .await
        .context("failed to connect to the database")?;
    MarketplaceModule::migrate(&db).await?;

    let module = MarketplaceModule::default();
    module.init(cfg.marketplace.clone(), Arc::new(db))?;

    let seeded = module.services()?.access.seed_permissions().await?;
    tracing::info!(permissions = seeded.len(), "permission catalog ready");

    if args.migrate_only {
        return Ok(());
    }

    let app = module
        .register_rest(axum::Router::new())?
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.bind_addr))?;
    tracing::info!(addr = %cfg.bind_addr, "marketplace server listening");

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_ctrl_c(shutdown.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;

    tracing::info!("marketplace server stopped");
    Ok(())
}

fn init_logging(cfg: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if cfg.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn wait_for_ctrl_c(shutdown: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown requested"),
        Err(e) => tracing::error!(error = %e, "failed to listen for ctrl-c"),
    }
    shutdown.cancel();
}
