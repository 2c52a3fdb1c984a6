//! Synthetic activity series backing the network-activity chart.
//!
//! These points are client-side placeholder values on their own 5-second
//! timeline, NOT derived from inbound telemetry. They exist purely to keep
//! the chart moving; nothing downstream may treat them as traffic data.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::Local;
use rand::Rng;

use crate::history::push_capped;

/// Points kept on screen.
pub const ACTIVITY_CAP: usize = 15;
/// How often a new point is generated.
pub const SAMPLE_PERIOD: Duration = Duration::from_secs(5);

const PACKETS_BASE: u64 = 1_800;
const PACKETS_JITTER: u64 = 1_200;

#[derive(Debug, Clone)]
pub struct ActivityPoint {
    /// Wall-clock label, HH:MM:SS.
    pub time: String,
    pub packets: u64,
    /// 0..2
    pub threats: f64,
}

pub struct ActivitySampler {
    points: VecDeque<ActivityPoint>,
}

impl ActivitySampler {
    /// Start with a full window of back-dated points so the chart is never
    /// empty on first draw.
    pub fn new() -> Self {
        let mut rng = rand::thread_rng();
        let now = Local::now();
        let points = (0..ACTIVITY_CAP)
            .map(|i| {
                let offset = ((ACTIVITY_CAP - 1 - i) as i64) * 15;
                let t = now - chrono::Duration::seconds(offset);
                ActivityPoint {
                    time: t.format("%H:%M:%S").to_string(),
                    packets: PACKETS_BASE + rng.gen_range(0..=PACKETS_JITTER),
                    threats: rng.gen_range(0.0..2.0),
                }
            })
            .collect();
        Self { points }
    }

    /// Push one fresh point, evicting the oldest past capacity.
    pub fn sample(&mut self) {
        let mut rng = rand::thread_rng();
        let point = ActivityPoint {
            time: Local::now().format("%H:%M:%S").to_string(),
            packets: PACKETS_BASE + rng.gen_range(0..=PACKETS_JITTER),
            threats: rng.gen_range(0.0..2.0),
        };
        push_capped(&mut self.points, point, ACTIVITY_CAP);
    }

    pub fn points(&self) -> &VecDeque<ActivityPoint> {
        &self.points
    }

    pub fn latest_packets(&self) -> u64 {
        self.points.back().map(|p| p.packets).unwrap_or(0)
    }
}

impl Default for ActivitySampler {
    fn default() -> Self {
        Self::new()
    }
}
