//! Stat cards row: flows, detected, blocked, detection accuracy.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::feed::FeedState;
use crate::ui::theme::ACCENT;
use crate::ui::util::group_thousands;

pub fn draw_stats_cards(f: &mut ratatui::Frame<'_>, area: Rect, state: &FeedState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
            Constraint::Ratio(1, 4),
        ])
        .split(area);

    // Snapshot may be absent entirely; the accessors degrade per field.
    let stats = state.stats.clone().unwrap_or_default();

    card(
        f,
        cols[0],
        "Packets Processed",
        &group_thousands(stats.display_total_flows()),
        "live capture",
    );
    card(
        f,
        cols[1],
        "Threats Detected",
        &group_thousands(stats.display_threats_detected()),
        "since start",
    );
    card(
        f,
        cols[2],
        "Threats Blocked",
        &group_thousands(stats.display_threats_blocked()),
        &format!("{}% of detected", state.blocked_percentage()),
    );
    card(
        f,
        cols[3],
        "Detection Accuracy",
        &stats.display_detection_rate(),
        stats.uptime.as_deref().unwrap_or("uptime n/a"),
    );
}

fn card(f: &mut ratatui::Frame<'_>, area: Rect, label: &str, value: &str, note: &str) {
    let block = Block::default().borders(Borders::ALL).title(label.to_string());
    f.render_widget(block, area);

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if inner.height == 0 {
        return;
    }

    let mut lines = vec![Line::from(Span::styled(
        value.to_string(),
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    ))];
    if inner.height > 1 {
        lines.push(Line::from(Span::raw(note.to_string())));
    }
    f.render_widget(Paragraph::new(lines), inner);
}
