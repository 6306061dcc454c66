use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Widget},
};

pub struct HeaderWidget<'a> {
    title: &'a str,
    rendered_at: Option<&'a str>,
}

impl<'a> HeaderWidget<'a> {
    pub fn new(title: &'a str, rendered_at: Option<&'a str>) -> Self {
        Self { title, rendered_at }
    }
}

impl Widget for HeaderWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 2 || inner.height == 0 {
            return;
        }

        let status = match self.rendered_at {
            Some(at) => format!("Data sourced from CoinGecko | Last updated: {}", at),
            None => "Loading prices...".to_string(),
        };
        buf.set_string(inner.x + 1, inner.y, status, Style::default().fg(Color::DarkGray));

        let hint = "q: quit";
        let hint_len = hint.len() as u16;
        if inner.width > hint_len + 2 {
            buf.set_string(
                inner.x + inner.width - hint_len - 1,
                inner.y,
                hint,
                Style::default().fg(Color::DarkGray),
            );
        }
    }
}
