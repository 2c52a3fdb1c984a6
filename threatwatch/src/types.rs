//! Types that mirror the backend's JSON wire schema.
//!
//! Every field is `#[serde(default)]`: a partial or malformed payload must
//! degrade the display, never fail it. "No data yet" is kept distinguishable
//! from real telemetry by carrying stats fields as `Option`; the placeholder
//! figures live in [`crate::demo`] and only enter at the display accessors.

use std::fmt;

use serde::Deserialize;

use crate::demo;

/// One frame pushed by the backend: `{"event": <name>, "data": <payload>}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum FeedFrame {
    StatsUpdate(StatsSnapshot),
    NewThreat(ThreatEvent),
    ModelInfo(ModelInfo),
}

impl FeedFrame {
    /// Parse a raw text frame. Unknown events and malformed JSON yield `None`
    /// and are dropped by the caller.
    pub fn parse(raw: &str) -> Option<FeedFrame> {
        serde_json::from_str(raw).ok()
    }
}

/// Replace-wholesale counters snapshot. No invariant between the counters is
/// enforced client-side (blocked <= detected is the server's business).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsSnapshot {
    #[serde(default)]
    pub total_flows: Option<u64>,
    #[serde(default)]
    pub threats_detected: Option<u64>,
    #[serde(default)]
    pub threats_blocked: Option<u64>,
    #[serde(default)]
    pub detection_rate: Option<DetectionRate>,
    #[serde(default)]
    pub uptime: Option<String>,
}

impl StatsSnapshot {
    pub fn display_total_flows(&self) -> u64 {
        self.total_flows.unwrap_or(demo::TOTAL_FLOWS)
    }

    pub fn display_threats_detected(&self) -> u64 {
        self.threats_detected.unwrap_or(demo::THREATS_DETECTED)
    }

    pub fn display_threats_blocked(&self) -> u64 {
        self.threats_blocked.unwrap_or(demo::THREATS_BLOCKED)
    }

    pub fn display_detection_rate(&self) -> String {
        match &self.detection_rate {
            Some(r) => r.to_string(),
            None => format!("{:.1}%", demo::DETECTION_RATE_PCT),
        }
    }
}

/// The backend has sent this both as a pre-formatted string ("97.8%") and as
/// a bare number; accept either.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DetectionRate {
    Percent(f64),
    Text(String),
}

impl fmt::Display for DetectionRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionRate::Percent(p) => write!(f, "{:.1}%", p),
            DetectionRate::Text(s) => f.write_str(s),
        }
    }
}

/// A single detection, immutable once received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreatEvent {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub threat_type: String,
    /// 0..1
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub source_ip: String,
    #[serde(default)]
    pub dest_ip: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl ThreatEvent {
    pub fn confidence_pct(&self) -> u8 {
        (self.confidence.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// Last-known-value record about the detection model; absent until the
/// backend greets us.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelInfo {
    #[serde(default)]
    pub model_architecture: Option<String>,
    #[serde(default)]
    pub parameter_count: Option<u64>,
    #[serde(default)]
    pub accuracy_percentage: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_stats_update_envelope() {
        let raw = r#"{"event":"stats_update","data":{"total_flows":9,"threats_detected":3,"threats_blocked":2,"detection_rate":"78.5%","uptime":"00:01:02"}}"#;
        let frame = FeedFrame::parse(raw).expect("frame");
        let FeedFrame::StatsUpdate(s) = frame else {
            panic!("wrong variant");
        };
        assert_eq!(s.total_flows, Some(9));
        assert_eq!(s.display_detection_rate(), "78.5%");
        assert_eq!(s.uptime.as_deref(), Some("00:01:02"));
    }

    #[test]
    fn parses_new_threat_envelope() {
        let raw = r#"{"event":"new_threat","data":{"timestamp":"2026-08-30T10:00:00Z","threat_type":"Ransomware","confidence":0.91,"source_ip":"192.168.1.7","dest_ip":"10.0.3.4","status":"BLOCKED"}}"#;
        let Some(FeedFrame::NewThreat(t)) = FeedFrame::parse(raw) else {
            panic!("expected new_threat");
        };
        assert_eq!(t.threat_type, "Ransomware");
        assert_eq!(t.confidence_pct(), 91);
        assert_eq!(t.status.as_deref(), Some("BLOCKED"));
    }

    #[test]
    fn parses_model_info_envelope() {
        let raw = r#"{"event":"model_info","data":{"model_architecture":"GCN-Threat-Detector","parameter_count":452485,"accuracy_percentage":78.47,"status":"Running"}}"#;
        let Some(FeedFrame::ModelInfo(m)) = FeedFrame::parse(raw) else {
            panic!("expected model_info");
        };
        assert_eq!(m.parameter_count, Some(452485));
    }

    #[test]
    fn unknown_event_and_garbage_are_dropped() {
        assert!(FeedFrame::parse(r#"{"event":"heartbeat","data":{}}"#).is_none());
        assert!(FeedFrame::parse("not json at all").is_none());
    }

    #[test]
    fn missing_stats_fields_fall_back_to_demo_figures() {
        let raw = r#"{"event":"stats_update","data":{"total_flows":120}}"#;
        let Some(FeedFrame::StatsUpdate(s)) = FeedFrame::parse(raw) else {
            panic!("expected stats_update");
        };
        // Present field wins; absent fields degrade to the documented figures.
        assert_eq!(s.display_total_flows(), 120);
        assert_eq!(s.threats_detected, None);
        assert_eq!(s.display_threats_detected(), crate::demo::THREATS_DETECTED);
        assert_eq!(s.display_threats_blocked(), crate::demo::THREATS_BLOCKED);
        assert_eq!(s.display_detection_rate(), "97.8%");
    }

    #[test]
    fn detection_rate_accepts_number_or_string() {
        let n: DetectionRate = serde_json::from_str("97.8").unwrap();
        assert_eq!(n.to_string(), "97.8%");
        let s: DetectionRate = serde_json::from_str(r#""99%""#).unwrap();
        assert_eq!(s.to_string(), "99%");
    }
}
