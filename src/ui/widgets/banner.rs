use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Error,
    Warning,
}

impl BannerKind {
    fn style(self) -> Style {
        match self {
            BannerKind::Error => Style::default().fg(Color::Red),
            BannerKind::Warning => Style::default().fg(Color::Yellow),
        }
    }

    fn marker(self) -> &'static str {
        match self {
            BannerKind::Error => "✖ ",
            BannerKind::Warning => "⚠ ",
        }
    }
}

/// Stacked error/warning lines, one per message.
pub struct BannerWidget<'a> {
    messages: Vec<(BannerKind, &'a str)>,
}

impl<'a> BannerWidget<'a> {
    pub fn new() -> Self {
        Self { messages: Vec::new() }
    }

    pub fn push(mut self, kind: BannerKind, message: &'a str) -> Self {
        self.messages.push((kind, message));
        self
    }
}

impl Default for BannerWidget<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for BannerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .messages
            .into_iter()
            .map(|(kind, message)| {
                Line::from(vec![
                    Span::styled(kind.marker(), kind.style().add_modifier(Modifier::BOLD)),
                    Span::styled(message, kind.style()),
                ])
            })
            .collect();

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
