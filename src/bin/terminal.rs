//! Terminal dashboard
//!
//! Same panels as the web page, redrawn in place.
//! Run with: cargo run --bin coinboard-tui

use anyhow::{Context, Result};
use clap::Parser;
use coinboard::{config::Config, dashboard::Dashboard, market::MarketData, ui::App};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "coinboard-tui")]
#[command(about = "Live crypto price dashboard in the terminal")]
struct Cli {
    /// Configuration file (defaults to config/default.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    // Log to a file, the terminal belongs to the dashboard
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.ui.log_file)
        .with_context(|| format!("Failed to open log file {}", config.ui.log_file))?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("coinboard=info")))
        .init();

    tracing::info!("Starting terminal dashboard");

    let market = MarketData::from_config(&config).context("Failed to build HTTP client")?;
    let dashboard = Dashboard::new(Arc::new(market), config.dashboard.clone());

    let mut app = App::new(dashboard, &config.ui);
    app.run().await?;

    Ok(())
}
