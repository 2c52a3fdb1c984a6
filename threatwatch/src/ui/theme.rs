//! Shared UI theme: per-threat-type colors and the accent color.

use ratatui::style::Color;

pub const ACCENT: Color = Color::Green;
pub const BADGE_OK: Color = Color::Green;
pub const BADGE_DOWN: Color = Color::Red;

/// Color for a threat family. Unrecognized types get the benign green, same
/// as the original dashboard's fallback.
pub fn threat_color(threat_type: &str) -> Color {
    match threat_type {
        "Ransomware" => Color::Red,
        "Cryptolocker" => Color::LightRed,
        "Locky" => Color::Yellow,
        "WannaCry" => Color::LightMagenta,
        "DDoS" => Color::Magenta,
        "Malware" => Color::LightYellow,
        _ => Color::Green,
    }
}
