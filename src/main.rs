use anyhow::{Context, Result};
use clap::Parser;
use coinboard::{config::Config, dashboard::Dashboard, market::MarketData, web};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "coinboard")]
#[command(about = "Serve the live crypto price dashboard")]
struct Cli {
    /// Configuration file (defaults to config/default.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to listen on, overrides server.bind
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("coinboard=info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    info!(
        "Loaded config for {} assets, {} charts, cache ttl {}s",
        config.dashboard.assets.len(),
        config.dashboard.charts.len(),
        config.cache.ttl_secs
    );

    let market = MarketData::from_config(&config).context("Failed to build HTTP client")?;
    let dashboard = Dashboard::new(Arc::new(market), config.dashboard.clone());
    let app = web::router(Arc::new(web::AppState::new(dashboard)));

    let addr = cli.bind.unwrap_or_else(|| config.server.bind.clone());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Dashboard running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
