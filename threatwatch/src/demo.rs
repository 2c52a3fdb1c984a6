//! Placeholder figures shown before the backend has reported anything.
//!
//! Kept apart from live state on purpose: the feed carries `Option` fields,
//! and these constants are substituted only when a value is absent, so code
//! can always tell "no data yet" from fabricated sample data.

pub const TOTAL_FLOWS: u64 = 126_322;
pub const THREATS_DETECTED: u64 = 23;
pub const THREATS_BLOCKED: u64 = 18;
pub const DETECTION_RATE_PCT: f64 = 97.8;
