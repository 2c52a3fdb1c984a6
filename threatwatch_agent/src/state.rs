//! Shared agent state: cumulative stats, the model card, and the broadcast
//! channel dashboards subscribe to.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{broadcast, Mutex};

use crate::flow::ThreatClass;
use crate::types::{ModelInfo, StatsSnapshot};

#[derive(Debug, Default, Clone)]
pub struct Stats {
    pub total_flows: u64,
    pub threats_detected: u64,
    pub threats_blocked: u64,
}

impl Stats {
    /// Fold one classified flow into the counters. Every non-benign flow is
    /// blocked, so detected and blocked move together here.
    pub fn record(&mut self, class: ThreatClass) {
        self.total_flows += 1;
        if class.is_malicious() {
            self.threats_detected += 1;
            self.threats_blocked += 1;
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub stats: Arc<Mutex<Stats>>,
    pub model: Arc<ModelInfo>,
    pub started: Instant,
    /// Serialized frames fanned out to every connected dashboard.
    pub feed_tx: broadcast::Sender<String>,
}

impl AppState {
    pub fn new(model: ModelInfo) -> Self {
        let (feed_tx, _) = broadcast::channel(64);
        Self {
            stats: Arc::new(Mutex::new(Stats::default())),
            model: Arc::new(model),
            started: Instant::now(),
            feed_tx,
        }
    }

    pub async fn snapshot(&self) -> StatsSnapshot {
        let stats = self.stats.lock().await.clone();
        StatsSnapshot {
            total_flows: stats.total_flows,
            threats_detected: stats.threats_detected,
            threats_blocked: stats.threats_blocked,
            detection_rate: format!("{:.1}%", self.model.accuracy_percentage),
            uptime: format_uptime(self.started.elapsed().as_secs()),
        }
    }
}

pub fn format_uptime(total_secs: u64) -> String {
    let h = total_secs / 3600;
    let m = (total_secs % 3600) / 60;
    let s = total_secs % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn benign_flows_only_bump_total() {
        let mut st = Stats::default();
        st.record(ThreatClass::Benign);
        st.record(ThreatClass::Benign);
        assert_eq!(st.total_flows, 2);
        assert_eq!(st.threats_detected, 0);
        assert_eq!(st.threats_blocked, 0);
    }

    #[test]
    fn malicious_flows_bump_detected_and_blocked() {
        let mut st = Stats::default();
        st.record(ThreatClass::Ransomware);
        st.record(ThreatClass::Locky);
        st.record(ThreatClass::Benign);
        assert_eq!(st.total_flows, 3);
        assert_eq!(st.threats_detected, 2);
        assert_eq!(st.threats_blocked, 2);
    }

    #[test]
    fn uptime_formats_as_clock() {
        assert_eq!(format_uptime(0), "00:00:00");
        assert_eq!(format_uptime(61), "00:01:01");
        assert_eq!(format_uptime(3_661), "01:01:01");
        assert_eq!(format_uptime(90_000), "25:00:00");
    }

    #[tokio::test]
    async fn snapshot_reflects_recorded_flows() {
        let state = AppState::new(ModelInfo::demo());
        state.stats.lock().await.record(ThreatClass::WannaCry);
        let snap = state.snapshot().await;
        assert_eq!(snap.total_flows, 1);
        assert_eq!(snap.threats_detected, 1);
        assert_eq!(snap.detection_rate, "78.5%");
        assert_eq!(snap.uptime.len(), 8);
    }
}
