//! Live feed state: folds pushed events into bounded in-memory collections.
//!
//! `FeedState` is pure state + fold logic; `FeedSession` owns the transport
//! reader task and the channel it delivers on. Presentation reads the state,
//! never mutates it.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::history::prepend_capped;
use crate::types::{FeedFrame, ModelInfo, StatsSnapshot, ThreatEvent};
use crate::ws;

/// The threat log keeps only the most recent detections.
pub const THREAT_LOG_CAP: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

impl ConnectionState {
    /// Text shown on the header badge.
    pub fn badge(self) -> &'static str {
        match self {
            ConnectionState::Connected => "Connection Active",
            ConnectionState::Disconnected => "Disconnected",
        }
    }
}

/// Everything a session can deliver: transport-level signals plus parsed frames.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    Connected,
    Disconnected,
    Frame(FeedFrame),
}

pub struct FeedState {
    pub connection: ConnectionState,
    /// Wholesale-replaced on every stats_update; `None` until the first one.
    pub stats: Option<StatsSnapshot>,
    /// Newest first, capped at [`THREAT_LOG_CAP`].
    pub threats: VecDeque<ThreatEvent>,
    /// threat_type -> cumulative count; monotonically non-decreasing per key.
    pub distribution: HashMap<String, u64>,
    pub model_info: Option<ModelInfo>,
}

impl FeedState {
    pub fn new() -> Self {
        Self {
            connection: ConnectionState::Disconnected,
            stats: None,
            threats: VecDeque::with_capacity(THREAT_LOG_CAP),
            distribution: HashMap::new(),
            model_info: None,
        }
    }

    /// Fold one delivered event into the model.
    pub fn apply(&mut self, ev: FeedEvent) {
        match ev {
            FeedEvent::Connected => self.connection = ConnectionState::Connected,
            FeedEvent::Disconnected => self.connection = ConnectionState::Disconnected,
            FeedEvent::Frame(FeedFrame::StatsUpdate(s)) => self.stats = Some(s),
            FeedEvent::Frame(FeedFrame::NewThreat(t)) => self.record_threat(t),
            FeedEvent::Frame(FeedFrame::ModelInfo(m)) => self.model_info = Some(m),
        }
    }

    fn record_threat(&mut self, t: ThreatEvent) {
        *self.distribution.entry(t.threat_type.clone()).or_insert(0) += 1;
        prepend_capped(&mut self.threats, t, THREAT_LOG_CAP);
    }

    /// Share of detected threats that were blocked, rounded to whole percent.
    /// Zero detections means zero percent, not an error.
    pub fn blocked_percentage(&self) -> u64 {
        let detected = self
            .stats
            .as_ref()
            .and_then(|s| s.threats_detected)
            .unwrap_or(0);
        if detected == 0 {
            return 0;
        }
        let blocked = self
            .stats
            .as_ref()
            .and_then(|s| s.threats_blocked)
            .unwrap_or(0);
        ((blocked as f64 / detected as f64) * 100.0).round() as u64
    }

    /// Distribution entries sorted by count (desc), then name for stability.
    pub fn distribution_sorted(&self) -> Vec<(&str, u64)> {
        let mut out: Vec<(&str, u64)> = self
            .distribution
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        out
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Reconnect policy. Doubles after each failed cycle, resets on connect.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    pub initial: Duration,
    pub max: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial: Duration::from_secs(1),
            max: Duration::from_secs(30),
        }
    }
}

impl Backoff {
    pub fn next_delay(&self, current: Duration) -> Duration {
        (current * 2).min(self.max)
    }
}

/// An explicitly owned connection to the push channel.
///
/// Owns the reader task and the receiving half of the event queue. Dropping
/// or [`close`](FeedSession::close)-ing the session tears both down, so no
/// event can reach state afterwards.
pub struct FeedSession {
    events: mpsc::Receiver<FeedEvent>,
    reader: JoinHandle<()>,
}

impl FeedSession {
    /// Connect to `url` and keep reading forever, reconnecting per `backoff`.
    /// Connect failures are silent; the only visible signal is the absence of
    /// a `Connected` event.
    pub fn open(url: &str, backoff: Backoff) -> Self {
        let (tx, rx) = mpsc::channel(256);
        let reader = tokio::spawn(ws::run_reader(url.to_string(), backoff, tx));
        Self {
            events: rx,
            reader,
        }
    }

    #[cfg(test)]
    fn from_parts(events: mpsc::Receiver<FeedEvent>, reader: JoinHandle<()>) -> Self {
        Self { events, reader }
    }

    /// Drain one pending event without blocking; `None` when the queue is idle.
    pub fn try_event(&mut self) -> Option<FeedEvent> {
        self.events.try_recv().ok()
    }

    /// Wait for the next event. `None` only if the reader task died.
    pub async fn next_event(&mut self) -> Option<FeedEvent> {
        self.events.recv().await
    }

    /// Stop the reader and consume the receiver. After this returns, no
    /// further callback can mutate state built from this session.
    pub fn close(self) {
        self.reader.abort();
    }
}

impl Drop for FeedSession {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threat(ts: &str, kind: &str) -> FeedEvent {
        FeedEvent::Frame(FeedFrame::NewThreat(ThreatEvent {
            timestamp: ts.to_string(),
            threat_type: kind.to_string(),
            confidence: 0.9,
            source_ip: "192.168.1.2".into(),
            dest_ip: "10.0.0.9".into(),
            status: Some("BLOCKED".into()),
        }))
    }

    fn stats(detected: Option<u64>, blocked: Option<u64>) -> FeedEvent {
        FeedEvent::Frame(FeedFrame::StatsUpdate(StatsSnapshot {
            threats_detected: detected,
            threats_blocked: blocked,
            ..Default::default()
        }))
    }

    #[test]
    fn log_caps_at_fifty_newest_first() {
        let mut st = FeedState::new();
        for i in 0..51 {
            st.apply(threat(&format!("t{i}"), "Ransomware"));
        }
        assert_eq!(st.threats.len(), THREAT_LOG_CAP);
        // Newest at index 0, oldest (t0) evicted.
        assert_eq!(st.threats[0].timestamp, "t50");
        assert_eq!(st.threats[THREAT_LOG_CAP - 1].timestamp, "t1");
    }

    #[test]
    fn distribution_counts_every_occurrence() {
        let mut st = FeedState::new();
        for i in 0..7 {
            st.apply(threat(&format!("a{i}"), "Locky"));
        }
        for i in 0..3 {
            st.apply(threat(&format!("b{i}"), "WannaCry"));
        }
        assert_eq!(st.distribution.get("Locky"), Some(&7));
        assert_eq!(st.distribution.get("WannaCry"), Some(&3));
        // Counts survive log eviction: the log is capped, the counters are not.
        for i in 0..100 {
            st.apply(threat(&format!("c{i}"), "Locky"));
        }
        assert_eq!(st.distribution.get("Locky"), Some(&107));
    }

    #[test]
    fn blocked_percentage_guards_division_by_zero() {
        let mut st = FeedState::new();
        assert_eq!(st.blocked_percentage(), 0);
        st.apply(stats(Some(0), Some(0)));
        assert_eq!(st.blocked_percentage(), 0);
        st.apply(stats(Some(10), Some(5)));
        assert_eq!(st.blocked_percentage(), 50);
    }

    #[test]
    fn connection_state_follows_transport_signals() {
        let mut st = FeedState::new();
        assert_eq!(st.connection, ConnectionState::Disconnected);
        assert_eq!(st.connection.badge(), "Disconnected");
        st.apply(FeedEvent::Connected);
        assert_eq!(st.connection, ConnectionState::Connected);
        assert_eq!(st.connection.badge(), "Connection Active");
        st.apply(FeedEvent::Disconnected);
        assert_eq!(st.connection, ConnectionState::Disconnected);
    }

    #[test]
    fn stats_replace_wholesale_not_merged() {
        let mut st = FeedState::new();
        st.apply(FeedEvent::Frame(FeedFrame::StatsUpdate(StatsSnapshot {
            total_flows: Some(100),
            uptime: Some("00:10:00".into()),
            ..Default::default()
        })));
        st.apply(FeedEvent::Frame(FeedFrame::StatsUpdate(StatsSnapshot {
            total_flows: Some(101),
            ..Default::default()
        })));
        let s = st.stats.as_ref().unwrap();
        assert_eq!(s.total_flows, Some(101));
        // The earlier uptime must not leak through the replacement.
        assert_eq!(s.uptime, None);
    }

    #[test]
    fn distribution_sorted_by_count_then_name() {
        let mut st = FeedState::new();
        st.apply(threat("1", "Locky"));
        st.apply(threat("2", "Ransomware"));
        st.apply(threat("3", "Ransomware"));
        st.apply(threat("4", "Benign"));
        let order: Vec<&str> = st.distribution_sorted().iter().map(|(n, _)| *n).collect();
        assert_eq!(order, vec!["Ransomware", "Benign", "Locky"]);
    }

    #[test]
    fn backoff_doubles_and_saturates() {
        let b = Backoff::default();
        let mut d = b.initial;
        d = b.next_delay(d);
        assert_eq!(d, Duration::from_secs(2));
        for _ in 0..10 {
            d = b.next_delay(d);
        }
        assert_eq!(d, b.max);
    }

    #[tokio::test]
    async fn close_stops_delivery_from_a_chatty_reader() {
        let (tx, rx) = mpsc::channel(4);
        let reader = tokio::spawn(async move {
            let mut i = 0u64;
            loop {
                if tx.send(threat(&format!("t{i}"), "Locky")).await.is_err() {
                    return;
                }
                i += 1;
            }
        });
        let mut session = FeedSession::from_parts(rx, reader);

        let mut st = FeedState::new();
        let first = session.next_event().await.expect("reader is live");
        st.apply(first);
        assert_eq!(st.threats.len(), 1);

        // After close the receiver is consumed and the reader aborted: there
        // is no path left for a late event to mutate the state.
        session.close();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(st.threats.len(), 1);
    }
}
