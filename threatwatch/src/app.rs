//! App state and main loop: input handling, draining the feed session,
//! ticking the synthetic sampler, and drawing.

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::time::sleep;

use crate::feed::{Backoff, FeedSession, FeedState};
use crate::sampler::{ActivitySampler, SAMPLE_PERIOD};
use crate::ui::{
    activity::draw_activity,
    distribution::draw_distribution,
    feed::{draw_feed, feed_clamp, feed_handle_key},
    header::draw_header,
    stats::draw_stats_cards,
};

pub struct App {
    feed: FeedState,
    sampler: ActivitySampler,

    feed_scroll: usize,
    should_quit: bool,

    last_sample: Instant,
}

impl App {
    pub fn new() -> Self {
        Self {
            feed: FeedState::new(),
            sampler: ActivitySampler::new(),
            feed_scroll: 0,
            should_quit: false,
            last_sample: Instant::now(),
        }
    }

    pub async fn run(&mut self, url: &str) -> anyhow::Result<()> {
        // The session owns the transport; we only drain its queue.
        let mut session = FeedSession::open(url, Backoff::default());

        // Terminal setup
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let res = self.event_loop(&mut terminal, &mut session).await;

        // Teardown: session first so nothing mutates state mid-restore.
        session.close();
        disable_raw_mode()?;
        let backend = terminal.backend_mut();
        execute!(backend, LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        session: &mut FeedSession,
    ) -> anyhow::Result<()> {
        loop {
            // Input (non-blocking)
            while event::poll(Duration::from_millis(10))? {
                if let Event::Key(k) = event::read()? {
                    if matches!(k.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                        self.should_quit = true;
                    }
                    let page = terminal.size()?.height.saturating_sub(12).max(1) as usize;
                    feed_handle_key(&mut self.feed_scroll, k, page);
                    feed_clamp(&mut self.feed_scroll, self.feed.threats.len(), page);
                }
            }
            if self.should_quit {
                break;
            }

            // Fold everything the session has queued since the last frame.
            while let Some(ev) = session.try_event() {
                self.feed.apply(ev);
            }

            // Synthetic chart point every 5s, on its own timeline.
            if self.last_sample.elapsed() >= SAMPLE_PERIOD {
                self.sampler.sample();
                self.last_sample = Instant::now();
            }

            terminal.draw(|f| self.draw(f))?;

            // Tick rate
            sleep(Duration::from_millis(100)).await;
        }

        Ok(())
    }

    pub fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let area = f.area();

        // Root rows: header, stat cards, charts, threat feed
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Length(4), // stat cards
                Constraint::Length(7), // activity + distribution
                Constraint::Min(8),    // threat feed
            ])
            .split(area);

        draw_header(f, rows[0], &self.feed);
        draw_stats_cards(f, rows[1], &self.feed);

        let charts = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[2]);
        draw_activity(f, charts[0], &self.sampler);
        draw_distribution(f, charts[1], &self.feed);

        draw_feed(f, rows[3], &self.feed, self.feed_scroll);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
