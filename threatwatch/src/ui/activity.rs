//! Network-activity sparkline fed by the synthetic sampler.
//! Placeholder data, labelled as such in the panel title.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Sparkline},
};

use crate::sampler::ActivitySampler;

pub fn draw_activity(f: &mut ratatui::Frame<'_>, area: Rect, sampler: &ActivitySampler) {
    let title = format!(
        "Network Activity (pkts, simulated) — now: {}",
        sampler.latest_packets()
    );
    let max_points = area.width.saturating_sub(2) as usize;
    let points = sampler.points();
    let start = points.len().saturating_sub(max_points);
    let data: Vec<u64> = points.iter().skip(start).map(|p| p.packets).collect();

    let spark = Sparkline::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .data(&data)
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(spark, area);
}
