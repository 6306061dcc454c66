//! Server-side HTML for the dashboard page.
//!
//! Metrics and banners are plain markup; charts are drawn in the browser with
//! Lightweight Charts from series data embedded in the page.

use crate::dashboard::{ChartPanel, DashboardView, Metric, Section};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

const DEFAULT_LINE_COLOR: &str = "#2962ff";

const STYLE: &str = r#"
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #131722;
            color: #d1d4dc;
            min-height: 100vh;
        }
        .header {
            padding: 12px 24px;
            background: #1e222d;
            border-bottom: 1px solid #2a2e39;
        }
        .header h1 { font-size: 22px; color: #00c853; font-weight: 600; }
        .header p { font-size: 13px; color: #787b86; margin-top: 4px; }
        .header a { color: #d1d4dc; }
        main { padding: 16px 24px; display: flex; flex-direction: column; gap: 20px; }
        .metrics { display: flex; gap: 16px; }
        .metric {
            flex: 1;
            background: #1e222d;
            border: 1px solid #2a2e39;
            border-radius: 4px;
            padding: 12px 16px;
        }
        .metric-label { font-size: 13px; color: #787b86; }
        .metric-value { font-size: 32px; font-weight: 600; margin-top: 4px; }
        .chart-panel h2 { font-size: 18px; font-weight: 600; margin-bottom: 8px; }
        .chart { width: 100%; height: 320px; }
        .banner { padding: 10px 14px; border-radius: 4px; font-size: 14px; margin-bottom: 8px; }
        .banner.error { background: #3b1c1f; color: #ff6b6b; border: 1px solid #5c2b2f; }
        .banner.warning { background: #3b321c; color: #ffd166; border: 1px solid #5c4e2b; }
"#;

#[derive(Serialize)]
struct ChartData<'a> {
    id: String,
    color: &'a str,
    data: Vec<LinePoint>,
}

#[derive(Serialize)]
struct LinePoint {
    time: String,
    value: f64,
}

pub fn render_page(view: &DashboardView, refresh_secs: u64) -> String {
    let mut body = String::new();

    match &view.metrics {
        Section::Ready(metrics) => render_metrics(&mut body, metrics),
        Section::Error(message) => banner(&mut body, "error", message),
        Section::Empty => {}
    }

    let mut chart_data = Vec::new();
    for (index, panel) in view.charts.iter().enumerate() {
        if let Some(data) = render_chart_panel(&mut body, index, panel) {
            chart_data.push(data);
        }
    }

    let title = escape_html(&view.title);
    let mut html = String::with_capacity(4096 + body.len());
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("    <meta charset=\"UTF-8\">\n");
    html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    if refresh_secs > 0 {
        html.push_str(&format!(
            "    <meta http-equiv=\"refresh\" content=\"{}\">\n",
            refresh_secs
        ));
    }
    html.push_str(&format!("    <title>{}</title>\n", title));
    html.push_str("    <script src=\"https://unpkg.com/lightweight-charts@4.1.0/dist/lightweight-charts.standalone.production.js\"></script>\n");
    html.push_str(&format!("    <style>{}    </style>\n", STYLE));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<div class=\"header\">\n    <h1>🪙 {}</h1>\n    <p>Data sourced from <a href=\"https://www.coingecko.com/\">CoinGecko</a> | Last updated: {}</p>\n</div>\n",
        title,
        escape_html(&view.rendered_at)
    ));
    html.push_str("<main>\n");
    html.push_str(&body);
    html.push_str("</main>\n");
    html.push_str(&chart_script(&chart_data));
    html.push_str("</body>\n</html>\n");
    html
}

fn render_metrics(out: &mut String, metrics: &[Metric]) {
    out.push_str("<div class=\"metrics\">\n");
    for metric in metrics {
        out.push_str(&format!(
            "    <div class=\"metric\"><div class=\"metric-label\">{}</div><div class=\"metric-value\">{}</div></div>\n",
            escape_html(&metric.label),
            escape_html(&metric.value)
        ));
    }
    out.push_str("</div>\n");
}

fn render_chart_panel<'a>(out: &mut String, index: usize, panel: &'a ChartPanel) -> Option<ChartData<'a>> {
    out.push_str("<section class=\"chart-panel\">\n");
    out.push_str(&format!("    <h2>{}</h2>\n", escape_html(&panel.title)));

    let data = match &panel.series {
        Section::Ready(series) => {
            let id = format!("chart-{}", index);
            out.push_str(&format!("    <div class=\"chart\" id=\"{}\"></div>\n", id));
            let data = series
                .chart_points()
                .into_iter()
                .map(|p| LinePoint {
                    time: p.date.format("%Y-%m-%d").to_string(),
                    value: p.price.to_f64().unwrap_or(0.0),
                })
                .collect();
            Some(ChartData {
                id,
                color: panel.color.as_deref().unwrap_or(DEFAULT_LINE_COLOR),
                data,
            })
        }
        Section::Empty => {
            banner(out, "warning", &panel.warning);
            None
        }
        Section::Error(message) => {
            banner(out, "error", message);
            banner(out, "warning", &panel.warning);
            None
        }
    };

    out.push_str("</section>\n");
    data
}

fn banner(out: &mut String, kind: &str, message: &str) {
    out.push_str(&format!(
        "    <div class=\"banner {}\">{}</div>\n",
        kind,
        escape_html(message)
    ));
}

fn chart_script(charts: &[ChartData<'_>]) -> String {
    if charts.is_empty() {
        return String::new();
    }

    // `</` would close the script element early
    let payload = serde_json::to_string(charts)
        .unwrap_or_else(|_| "[]".to_string())
        .replace("</", "<\\/");

    format!(
        r##"<script>
    const charts = {payload};
    for (const panel of charts) {{
        const container = document.getElementById(panel.id);
        const chart = LightweightCharts.createChart(container, {{
            autoSize: true,
            layout: {{ background: {{ color: '#131722' }}, textColor: '#d1d4dc' }},
            grid: {{ vertLines: {{ color: '#2a2e39' }}, horzLines: {{ color: '#2a2e39' }} }},
            timeScale: {{ borderColor: '#2a2e39' }},
            rightPriceScale: {{ borderColor: '#2a2e39' }},
        }});
        const series = chart.addLineSeries({{ color: panel.color, lineWidth: 2 }});
        series.setData(panel.data);
        chart.timeScale().fitContent();
    }}
</script>
"##
    )
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FetchError;
    use crate::config::DashboardConfig;
    use crate::data::{HistoricalSeries, PricePoint};
    use chrono::{Local, NaiveDate, TimeZone};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn eth_series() -> Arc<HistoricalSeries> {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        Arc::new(HistoricalSeries::new(
            "ethereum",
            vec![
                PricePoint { date, price: dec!(3780.5) },
                PricePoint { date: date.succ_opt().unwrap(), price: dec!(3815) },
            ],
        ))
    }

    fn view(
        prices_error: Option<FetchError>,
        charts: Vec<Result<Arc<HistoricalSeries>, FetchError>>,
    ) -> DashboardView {
        let config = DashboardConfig::default();
        let prices = match prices_error {
            Some(e) => Err(e),
            None => {
                let response = serde_json::from_str(r#"{"bitcoin":{"usd":65000},"ethereum":{"usd":3200}}"#).unwrap();
                Ok(Arc::new(crate::data::LivePrices::from_response(
                    &response,
                    &config.asset_ids(),
                    "usd",
                )))
            }
        };
        let pairs = config.charts.iter().zip(charts).collect();
        DashboardView::compose(
            &config,
            Local.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap(),
            prices,
            pairs,
        )
    }

    #[test]
    fn test_page_shows_metrics_and_charts() {
        let html = render_page(&view(None, vec![Ok(eth_series()), Ok(eth_series())]), 300);

        assert!(html.contains("Live Crypto Price Dashboard"));
        assert!(html.contains("Last updated: 2024-06-02 09:00:00"));
        assert!(html.contains("<div class=\"metric-value\">$65,000</div>"));
        assert!(html.contains("<div class=\"metric-value\">$3,200</div>"));
        assert!(html.contains("Ethereum (7-Day Price Chart)"));
        assert!(html.contains("id=\"chart-0\""));
        assert!(html.contains("id=\"chart-1\""));
        assert!(html.contains(r#"{"time":"2024-06-01","value":3780.5}"#));
        assert!(html.contains("#f7931a"));
        assert!(html.contains("http-equiv=\"refresh\" content=\"300\""));
        assert!(!html.contains("class=\"banner"));
    }

    #[test]
    fn test_price_failure_replaces_metrics_with_error() {
        let html = render_page(
            &view(Some(FetchError::Timeout), vec![Ok(eth_series()), Ok(eth_series())]),
            300,
        );

        assert!(!html.contains("<div class=\"metrics\">"));
        assert!(!html.contains("<div class=\"metric-value\">"));
        assert!(html.contains("<div class=\"banner error\">Error fetching live prices: request timed out</div>"));
        assert!(html.contains("id=\"chart-0\""));
    }

    #[test]
    fn test_empty_price_response_omits_metrics() {
        let config = DashboardConfig::default();
        let response = serde_json::from_str("{}").unwrap();
        let prices = crate::data::LivePrices::from_response(&response, &config.asset_ids(), "usd");
        let view = DashboardView::compose(
            &config,
            Local.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap(),
            Ok(Arc::new(prices)),
            config.charts.iter().map(|c| (c, Ok(eth_series()))).collect(),
        );
        let html = render_page(&view, 300);

        assert!(!html.contains("<div class=\"metrics\">"));
        assert!(!html.contains("$0"));
        assert!(!html.contains("class=\"banner"));
        assert!(html.contains("id=\"chart-1\""));
    }

    #[test]
    fn test_empty_and_failed_charts_show_warnings() {
        let empty = Arc::new(HistoricalSeries::new("ethereum", vec![]));
        let html = render_page(
            &view(None, vec![Ok(empty), Err(FetchError::Transport("dns error".into()))]),
            0,
        );

        assert!(html.contains("<div class=\"banner warning\">Could not load Ethereum chart data.</div>"));
        assert!(html.contains("Error fetching historical data: request failed: dns error"));
        assert!(html.contains("<div class=\"banner warning\">Could not load Bitcoin chart data.</div>"));
        assert!(!html.contains("LightweightCharts.createChart"));
        assert!(!html.contains("http-equiv"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<b>\"A&B\"</b>"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;");
        assert_eq!(escape_html("it's"), "it&#39;s");
    }
}
