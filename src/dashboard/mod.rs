pub mod format;
pub mod view;

pub use format::{currency_symbol, format_currency};
pub use view::{ChartPanel, DashboardView, Metric, Section};

use crate::config::DashboardConfig;
use crate::market::MarketData;
use chrono::Local;
use std::sync::Arc;
use tracing::info;

/// One render pass: fetch through the caches in page order, then compose.
pub struct Dashboard {
    market: Arc<MarketData>,
    config: DashboardConfig,
}

impl Dashboard {
    pub fn new(market: Arc<MarketData>, config: DashboardConfig) -> Self {
        Self { market, config }
    }

    pub fn market(&self) -> &MarketData {
        &self.market
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub async fn render(&self) -> DashboardView {
        let prices = self.market.live_prices().await;

        let mut charts = Vec::with_capacity(self.config.charts.len());
        for chart in &self.config.charts {
            let series = self.market.history(&chart.asset_id, chart.days).await;
            charts.push((chart, series));
        }

        let view = DashboardView::compose(&self.config, Local::now(), prices, charts);
        info!(
            "Rendered dashboard: {} errors, {} warnings",
            view.errors().len(),
            view.warnings().len()
        );
        view
    }
}
