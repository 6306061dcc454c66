use crate::config::UiConfig;
use crate::dashboard::{Dashboard, DashboardView};
use crate::ui::charts::PriceChart;
use crate::ui::widgets::{HeaderWidget, MetricsWidget};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tracing::warn;

const METRICS_HEIGHT: u16 = 5;

pub struct App {
    dashboard: Arc<Dashboard>,
    tick_rate: Duration,
    refresh_interval: Duration,
    view: Option<DashboardView>,
    last_refresh: Option<Instant>,
    pending: Option<JoinHandle<DashboardView>>,
    should_quit: bool,
}

impl App {
    pub fn new(dashboard: Dashboard, ui: &UiConfig) -> Self {
        let refresh_interval = dashboard.config().refresh_interval();
        Self {
            dashboard: Arc::new(dashboard),
            tick_rate: Duration::from_millis(ui.tick_ms),
            refresh_interval,
            view: None,
            last_refresh: None,
            pending: None,
            should_quit: false,
        }
    }

    pub fn view(&self) -> Option<&DashboardView> {
        self.view.as_ref()
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            self.collect_refresh().await;
            if self.refresh_due() {
                self.start_refresh();
            }

            terminal.draw(|f| self.draw(f))?;

            if event::poll(self.tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let KeyCode::Char('q') | KeyCode::Esc = key.code {
                            self.should_quit = true;
                        }
                    }
                }
            }

            if self.should_quit {
                if let Some(pending) = self.pending.take() {
                    pending.abort();
                }
                return Ok(());
            }
        }
    }

    fn refresh_due(&self) -> bool {
        self.pending.is_none()
            && self
                .last_refresh
                .map(|at| at.elapsed() >= self.refresh_interval)
                .unwrap_or(true)
    }

    pub fn is_refreshing(&self) -> bool {
        self.pending.is_some()
    }

    /// Recompose the view in the background so key presses are still read
    /// while the fetches run.
    pub fn start_refresh(&mut self) {
        if self.pending.is_some() {
            return;
        }
        let dashboard = Arc::clone(&self.dashboard);
        self.pending = Some(tokio::spawn(async move { dashboard.render().await }));
        self.last_refresh = Some(Instant::now());
    }

    /// Swap in the refreshed view once its task has finished.
    pub async fn collect_refresh(&mut self) {
        if !self.pending.as_ref().is_some_and(|p| p.is_finished()) {
            return;
        }
        let Some(pending) = self.pending.take() else {
            return;
        };
        match pending.await {
            Ok(view) => self.view = Some(view),
            Err(e) => warn!("Dashboard refresh task failed: {}", e),
        }
    }

    fn draw(&self, f: &mut Frame) {
        draw_dashboard(f, &self.dashboard.config().title, self.view.as_ref());
    }
}

/// Header, metrics row, then the charts sharing the remaining height.
pub fn draw_dashboard(f: &mut Frame, title: &str, view: Option<&DashboardView>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(METRICS_HEIGHT),
            Constraint::Min(0),
        ])
        .split(size);

    let Some(view) = view else {
        f.render_widget(HeaderWidget::new(title, None), main_chunks[0]);
        return;
    };

    f.render_widget(
        HeaderWidget::new(&view.title, Some(&view.rendered_at)),
        main_chunks[0],
    );
    f.render_widget(MetricsWidget::new(&view.metrics), main_chunks[1]);
    draw_charts(f, view, main_chunks[2]);
}

fn draw_charts(f: &mut Frame, view: &DashboardView, area: Rect) {
    if view.charts.is_empty() {
        return;
    }

    let count = view.charts.len() as u32;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(view.charts.iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);

    for (panel, chunk) in view.charts.iter().zip(chunks.iter()) {
        f.render_widget(PriceChart::new(panel), *chunk);
    }
}
