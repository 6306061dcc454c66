use crate::dashboard::{format_currency, ChartPanel, Section};
use crate::ui::widgets::{BannerKind, BannerWidget};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

const DEFAULT_LINE_COLOR: Color = Color::Cyan;

/// Daily price line for one chart panel, or its warning when there is no
/// series to draw.
pub struct PriceChart<'a> {
    panel: &'a ChartPanel,
}

impl<'a> PriceChart<'a> {
    pub fn new(panel: &'a ChartPanel) -> Self {
        Self { panel }
    }

    fn line_color(&self) -> Color {
        self.panel
            .color
            .as_deref()
            .and_then(parse_hex_color)
            .unwrap_or(DEFAULT_LINE_COLOR)
    }
}

impl Widget for PriceChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.panel.title))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let series = match &self.panel.series {
            Section::Ready(series) => series,
            Section::Empty => {
                let inner = block.inner(area);
                block.render(area, buf);
                BannerWidget::new()
                    .push(BannerKind::Warning, &self.panel.warning)
                    .render(inner, buf);
                return;
            }
            Section::Error(message) => {
                let inner = block.inner(area);
                block.render(area, buf);
                BannerWidget::new()
                    .push(BannerKind::Error, message)
                    .push(BannerKind::Warning, &self.panel.warning)
                    .render(inner, buf);
                return;
            }
        };

        let points = series.plot_points();
        let Some((min_price, max_price)) = series.price_range() else {
            block.render(area, buf);
            return;
        };
        let (min, max) = padded_bounds(
            min_price.to_f64().unwrap_or(0.0),
            max_price.to_f64().unwrap_or(0.0),
        );
        let last_x = points.last().map(|(x, _)| *x).unwrap_or(0.0).max(1.0);

        let chart_points = series.chart_points();
        let x_labels: Vec<String> = match (chart_points.first(), chart_points.last()) {
            (Some(first), Some(last)) => vec![
                first.date.format("%b %d").to_string(),
                last.date.format("%b %d").to_string(),
            ],
            _ => Vec::new(),
        };
        let y_labels: Vec<String> = [min, (min + max) / 2.0, max]
            .iter()
            .map(|v| format_currency(Decimal::from_f64_retain(*v).unwrap_or_default(), "$"))
            .collect();

        let dataset = Dataset::default()
            .name(series.asset_id.as_str())
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(self.line_color()))
            .data(&points);

        Chart::new(vec![dataset])
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, last_x])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([min, max])
                    .labels(y_labels),
            )
            .render(area, buf);
    }
}

/// Price range with 5% headroom on both sides; a flat series gets a band
/// around its value so the line is not drawn on the border.
fn padded_bounds(min: f64, max: f64) -> (f64, f64) {
    let range = max - min;
    let padding = if range > 0.0 {
        range * 0.05
    } else {
        (max.abs() * 0.05).max(1.0)
    };
    (min - padding, max + padding)
}

/// `#rrggbb` to a terminal colour.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#f7931a"), Some(Color::Rgb(0xf7, 0x93, 0x1a)));
        assert_eq!(parse_hex_color("f7931a"), None);
        assert_eq!(parse_hex_color("#f793"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }

    #[test]
    fn test_padded_bounds() {
        assert_eq!(padded_bounds(100.0, 200.0), (95.0, 205.0));
        let (low, high) = padded_bounds(3200.0, 3200.0);
        assert!(low < 3200.0 && high > 3200.0);
        assert_eq!(padded_bounds(0.0, 0.0), (-1.0, 1.0));
    }
}
