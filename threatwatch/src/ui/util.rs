//! Small UI helpers: number grouping, clock labels.

use chrono::DateTime;

/// 126322 -> "126,322"
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render an RFC 3339 timestamp as a local HH:MM:SS clock; anything
/// unparsable is shown as-is (the feed never fails on bad data).
pub fn clock_label(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%H:%M:%S").to_string(),
        Err(_) => timestamp.to_string(),
    }
}
