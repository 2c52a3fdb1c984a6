//! Top header with the product line, model status, and the connection badge.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::feed::FeedState;
use crate::ui::theme;

pub fn draw_header(f: &mut ratatui::Frame<'_>, area: Rect, state: &FeedState) {
    let model = state
        .model_info
        .as_ref()
        .map(|m| {
            let arch = m.model_architecture.as_deref().unwrap_or("model");
            match m.status.as_deref() {
                Some(s) => format!("{arch} [{s}]"),
                None => arch.to_string(),
            }
        })
        .unwrap_or_else(|| "model: n/a".into());

    let title = format!("threatwatch — AI network threat monitor | {model}  (press 'q' to quit)");
    f.render_widget(
        Block::default().title(title).borders(Borders::BOTTOM),
        area,
    );

    // Connection badge, right-aligned on the same line.
    let badge_color = match state.connection {
        crate::feed::ConnectionState::Connected => theme::BADGE_OK,
        crate::feed::ConnectionState::Disconnected => theme::BADGE_DOWN,
    };
    let badge = Line::from(Span::styled(
        format!("● {} ", state.connection.badge()),
        Style::default().fg(badge_color).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(badge).right_aligned(), area);
}
