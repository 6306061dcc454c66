use anyhow::{Context, Result};
use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
    pub dashboard: DashboardConfig,
    pub server: ServerConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub vs_currency: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.coingecko.com".to_string(),
            timeout_secs: 5,
            vs_currency: "usd".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: 300 }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// An asset shown as a metric panel.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AssetConfig {
    pub id: String,
    pub label: String,
}

/// A historical price chart.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChartConfig {
    pub asset_id: String,
    pub label: String,
    pub days: u32,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    pub refresh_secs: u64,
    pub assets: Vec<AssetConfig>,
    pub charts: Vec<ChartConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Live Crypto Price Dashboard".to_string(),
            refresh_secs: 300,
            assets: vec![
                AssetConfig {
                    id: "bitcoin".into(),
                    label: "Bitcoin".into(),
                },
                AssetConfig {
                    id: "ethereum".into(),
                    label: "Ethereum".into(),
                },
            ],
            charts: vec![
                ChartConfig {
                    asset_id: "ethereum".into(),
                    label: "Ethereum".into(),
                    days: 7,
                    color: None,
                },
                ChartConfig {
                    asset_id: "bitcoin".into(),
                    label: "Bitcoin".into(),
                    days: 30,
                    color: Some("#f7931a".into()), // Bitcoin orange
                },
            ],
        }
    }
}

impl DashboardConfig {
    pub fn asset_ids(&self) -> Vec<String> {
        self.assets.iter().map(|a| a.id.clone()).collect()
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_ms: u64,
    pub log_file: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            log_file: "coinboard.log".to_string(),
        }
    }
}

impl Config {
    /// Load from `path` (or the default location) layered under `COINBOARD_*`
    /// environment variables, e.g. `COINBOARD_SERVER__BIND`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path);

        let settings = ConfigLoader::builder()
            .add_source(File::from(config_path.clone()).required(path.is_some()))
            .add_source(
                Environment::with_prefix("COINBOARD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to build configuration from {}", config_path.display()))?;

        let config: Config = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.validate()?;
        Ok(config)
    }

    fn config_path() -> PathBuf {
        // Try local config first, then next to the executable
        let local_config = PathBuf::from("config/default.toml");
        if local_config.exists() {
            return local_config;
        }

        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let exe_config = exe_dir.join("config/default.toml");
                if exe_config.exists() {
                    return exe_config;
                }
            }
        }

        local_config
    }

    fn validate(&self) -> Result<()> {
        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than zero");
        }
        if let Some(chart) = self.dashboard.charts.iter().find(|c| c.days == 0) {
            anyhow::bail!("chart '{}' must cover at least one day", chart.label);
        }
        Ok(())
    }
}
