//! Data types pushed to dashboards over WebSocket.
//! Keep this module minimal and stable: it defines the wire format.

use serde::Serialize;

/// Envelope for every pushed frame: `{"event": <name>, "data": <payload>}`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum FeedFrame {
    StatsUpdate(StatsSnapshot),
    NewThreat(ThreatEvent),
    ModelInfo(ModelInfo),
}

impl FeedFrame {
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    pub total_flows: u64,
    pub threats_detected: u64,
    pub threats_blocked: u64,
    /// Pre-formatted, e.g. "78.5%"
    pub detection_rate: String,
    /// HH:MM:SS since agent start
    pub uptime: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreatEvent {
    /// RFC 3339
    pub timestamp: String,
    pub threat_type: String,
    /// 0..1
    pub confidence: f64,
    pub source_ip: String,
    pub dest_ip: String,
    /// BLOCKED for malicious traffic, BENIGN otherwise
    pub status: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub model_architecture: String,
    pub parameter_count: u64,
    pub accuracy_percentage: f64,
    pub status: String,
}

impl ModelInfo {
    /// The bundled demo model card.
    pub fn demo() -> Self {
        Self {
            model_architecture: "GCN-Threat-Detector".into(),
            parameter_count: 452_485,
            accuracy_percentage: 78.47,
            status: "Running".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_serialize_to_the_event_envelope() {
        let frame = FeedFrame::NewThreat(ThreatEvent {
            timestamp: "2026-08-30T10:00:00Z".into(),
            threat_type: "Locky".into(),
            confidence: 0.83,
            source_ip: "192.168.4.5".into(),
            dest_ip: "10.0.9.1".into(),
            status: "BLOCKED".into(),
        });
        let json = frame.to_json().unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["event"], "new_threat");
        assert_eq!(v["data"]["threat_type"], "Locky");
        assert_eq!(v["data"]["status"], "BLOCKED");

        let stats = FeedFrame::StatsUpdate(StatsSnapshot {
            total_flows: 3,
            threats_detected: 2,
            threats_blocked: 2,
            detection_rate: "78.5%".into(),
            uptime: "00:00:09".into(),
        });
        let v: serde_json::Value = serde_json::from_str(&stats.to_json().unwrap()).unwrap();
        assert_eq!(v["event"], "stats_update");
        assert_eq!(v["data"]["total_flows"], 3);
    }
}
