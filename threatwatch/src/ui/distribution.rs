//! Threat-type distribution: one bar per family, cumulative counts.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::feed::FeedState;
use crate::ui::theme::threat_color;

pub fn draw_distribution(f: &mut ratatui::Frame<'_>, area: Rect, state: &FeedState) {
    f.render_widget(
        Block::default().borders(Borders::ALL).title("Threat Distribution"),
        area,
    );

    let inner = Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    };
    if inner.height == 0 {
        return;
    }

    let entries = state.distribution_sorted();
    if entries.is_empty() {
        f.render_widget(
            Paragraph::new("no detections yet").style(Style::default().fg(ratatui::style::Color::DarkGray)),
            inner,
        );
        return;
    }

    let max = entries.iter().map(|(_, c)| *c).max().unwrap_or(1).max(1);
    let bar_width = inner.width.saturating_sub(22) as u64;

    let lines: Vec<Line> = entries
        .iter()
        .take(inner.height as usize)
        .map(|(name, count)| {
            let fill = ((count * bar_width) / max).max(1) as usize;
            let color = threat_color(name);
            Line::from(vec![
                Span::styled(
                    format!("{name:<13}"),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled("▇".repeat(fill), Style::default().fg(color)),
                Span::raw(format!(" {count}")),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}
