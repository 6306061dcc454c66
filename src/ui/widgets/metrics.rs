use crate::dashboard::{Metric, Section};
use crate::ui::widgets::banner::{BannerKind, BannerWidget};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

/// One bordered panel per asset, or the price error in their place.
pub struct MetricsWidget<'a> {
    section: &'a Section<Vec<Metric>>,
}

impl<'a> MetricsWidget<'a> {
    pub fn new(section: &'a Section<Vec<Metric>>) -> Self {
        Self { section }
    }
}

impl Widget for MetricsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let metrics = match self.section {
            Section::Ready(metrics) if !metrics.is_empty() => metrics,
            Section::Error(message) => {
                BannerWidget::new()
                    .push(BannerKind::Error, message)
                    .render(area, buf);
                return;
            }
            _ => return,
        };

        let constraints: Vec<Constraint> = metrics
            .iter()
            .map(|_| Constraint::Ratio(1, metrics.len() as u32))
            .collect();
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (metric, column) in metrics.iter().zip(columns.iter()) {
            let block = Block::default()
                .title(format!(" {} ", metric.label))
                .title_style(Style::default().fg(Color::Gray))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray));

            let inner = block.inner(*column);
            block.render(*column, buf);

            if inner.width == 0 || inner.height == 0 {
                continue;
            }

            buf.set_string(
                inner.x + 1,
                inner.y + inner.height.saturating_sub(1) / 2,
                &metric.value,
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            );
        }
    }
}
