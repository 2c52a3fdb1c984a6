//! Scrolling threat feed: newest detection on top.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::feed::FeedState;
use crate::ui::theme::threat_color;
use crate::ui::util::clock_label;

pub fn draw_feed(f: &mut ratatui::Frame<'_>, area: Rect, state: &FeedState, scroll: usize) {
    let title = format!("Live Threat Feed ({} shown)", state.threats.len());
    f.render_widget(Block::default().borders(Borders::ALL).title(title), area);

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if inner.height == 0 {
        return;
    }

    if state.threats.is_empty() {
        f.render_widget(
            Paragraph::new("monitoring network traffic... detections appear here in real time")
                .style(Style::default().fg(ratatui::style::Color::DarkGray)),
            inner,
        );
        return;
    }

    let lines: Vec<Line> = state
        .threats
        .iter()
        .skip(scroll)
        .take(inner.height as usize)
        .map(|t| {
            let color = threat_color(&t.threat_type);
            let status = t.status.as_deref().unwrap_or("BLOCKED");
            Line::from(vec![
                Span::styled(
                    format!("{:<9}", clock_label(&t.timestamp)),
                    Style::default().fg(ratatui::style::Color::DarkGray),
                ),
                Span::styled(
                    format!("{:<13}", t.threat_type),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{:>3}%  ", t.confidence_pct())),
                Span::raw(format!("{} → {}", t.source_ip, t.dest_ip)),
                Span::styled(
                    format!("  [{status}]"),
                    Style::default().fg(ratatui::style::Color::Green),
                ),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

/// Key handling for feed scrolling. `page` is the visible row count.
pub fn feed_handle_key(scroll: &mut usize, k: KeyEvent, page: usize) {
    match k.code {
        KeyCode::Up => *scroll = scroll.saturating_sub(1),
        KeyCode::Down => *scroll += 1,
        KeyCode::PageUp => *scroll = scroll.saturating_sub(page.max(1)),
        KeyCode::PageDown => *scroll += page.max(1),
        KeyCode::Home => *scroll = 0,
        _ => {}
    }
}

/// Clamp scroll so the window never runs past the end of the log.
pub fn feed_clamp(scroll: &mut usize, total: usize, page: usize) {
    let max = total.saturating_sub(page.max(1));
    if *scroll > max {
        *scroll = max;
    }
}
