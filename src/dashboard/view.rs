//! Surface-independent dashboard model.
//!
//! A `DashboardView` is built from fetch results alone, so it can be composed
//! and inspected without touching the network or a renderer.

use crate::api::FetchError;
use crate::config::{ChartConfig, DashboardConfig};
use crate::dashboard::format::{currency_symbol, format_currency};
use crate::data::{HistoricalSeries, LivePrices};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::Arc;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of one fetch as the user sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum Section<T> {
    Ready(T),
    /// The call succeeded but produced nothing to show.
    Empty,
    /// The call failed; carries the banner text.
    Error(String),
}

impl<T> Section<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, Section::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
    pub asset_id: String,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPanel {
    pub asset_id: String,
    pub title: String,
    pub days: u32,
    pub color: Option<String>,
    /// Shown in place of the chart when it cannot be drawn.
    pub warning: String,
    pub series: Section<Arc<HistoricalSeries>>,
}

impl ChartPanel {
    pub fn warning_visible(&self) -> bool {
        !self.series.is_ready()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub rendered_at: String,
    pub metrics: Section<Vec<Metric>>,
    pub charts: Vec<ChartPanel>,
}

impl DashboardView {
    /// Build the view from already-fetched results. `charts` pairs each
    /// configured chart with its fetch result, in display order.
    pub fn compose(
        config: &DashboardConfig,
        rendered_at: DateTime<Local>,
        prices: Result<Arc<LivePrices>, FetchError>,
        charts: Vec<(&ChartConfig, Result<Arc<HistoricalSeries>, FetchError>)>,
    ) -> Self {
        Self {
            title: config.title.clone(),
            rendered_at: rendered_at.format(TIMESTAMP_FORMAT).to_string(),
            metrics: metrics_section(config, prices),
            charts: charts
                .into_iter()
                .map(|(chart, result)| chart_panel(chart, result))
                .collect(),
        }
    }

    /// Every error banner on the page, top to bottom.
    pub fn errors(&self) -> Vec<&str> {
        let metrics = match &self.metrics {
            Section::Error(message) => Some(message.as_str()),
            _ => None,
        };
        let charts = self.charts.iter().filter_map(|c| match &c.series {
            Section::Error(message) => Some(message.as_str()),
            _ => None,
        });
        metrics.into_iter().chain(charts).collect()
    }

    /// Every warning banner on the page, top to bottom.
    pub fn warnings(&self) -> Vec<&str> {
        self.charts
            .iter()
            .filter(|c| c.warning_visible())
            .map(|c| c.warning.as_str())
            .collect()
    }
}

fn metrics_section(config: &DashboardConfig, prices: Result<Arc<LivePrices>, FetchError>) -> Section<Vec<Metric>> {
    match prices {
        // Nothing requested came back, so there is no panel worth showing
        Ok(prices) if !prices.has_quotes() => Section::Empty,
        Ok(prices) => {
            let symbol = currency_symbol(&prices.currency);
            let currency = prices.currency.to_uppercase();
            let metrics = config
                .assets
                .iter()
                .map(|asset| Metric {
                    asset_id: asset.id.clone(),
                    label: format!("{} ({})", asset.label, currency),
                    value: format_currency(prices.amount(&asset.id), &symbol),
                })
                .collect();
            Section::Ready(metrics)
        }
        Err(e) => Section::Error(format!("Error fetching live prices: {}", e)),
    }
}

fn chart_panel(chart: &ChartConfig, result: Result<Arc<HistoricalSeries>, FetchError>) -> ChartPanel {
    let series = match result {
        Ok(series) if series.is_empty() => Section::Empty,
        Ok(series) => Section::Ready(series),
        Err(e) => Section::Error(format!("Error fetching historical data: {}", e)),
    };

    ChartPanel {
        asset_id: chart.asset_id.clone(),
        title: format!("{} ({}-Day Price Chart)", chart.label, chart.days),
        days: chart.days,
        color: chart.color.clone(),
        warning: format!("Could not load {} chart data.", chart.label),
        series,
    }
}
