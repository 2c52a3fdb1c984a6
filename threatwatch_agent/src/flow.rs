//! Simulated flow generator: classified network flows with per-class
//! parameter envelopes, standing in for a live capture pipeline.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatClass {
    Benign,
    Cryptolocker,
    Locky,
    Ransomware,
    WannaCry,
}

impl ThreatClass {
    pub fn label(self) -> &'static str {
        match self {
            ThreatClass::Benign => "Benign",
            ThreatClass::Cryptolocker => "Cryptolocker",
            ThreatClass::Locky => "Locky",
            ThreatClass::Ransomware => "Ransomware",
            ThreatClass::WannaCry => "WannaCry",
        }
    }

    pub fn is_malicious(self) -> bool {
        !matches!(self, ThreatClass::Benign)
    }
}

// Sampling weights: Benign, Cryptolocker, Locky, Ransomware, WannaCry
const WEIGHTS: [(ThreatClass, u32); 5] = [
    (ThreatClass::Benign, 2),
    (ThreatClass::Cryptolocker, 8),
    (ThreatClass::Locky, 8),
    (ThreatClass::Ransomware, 20),
    (ThreatClass::WannaCry, 10),
];

pub fn sample_class<R: Rng>(rng: &mut R) -> ThreatClass {
    let total: u32 = WEIGHTS.iter().map(|(_, w)| w).sum();
    let mut pick = rng.gen_range(0..total);
    for (class, w) in WEIGHTS {
        if pick < w {
            return class;
        }
        pick -= w;
    }
    ThreatClass::Benign
}

/// One synthetic flow record with the features the classifier would see.
#[derive(Debug, Clone)]
pub struct FlowRecord {
    pub src_ip: String,
    pub dst_ip: String,
    pub duration: f64,
    pub protocol: u8,
    pub src_bytes: f64,
    pub dst_bytes: f64,
    pub packets: u32,
    pub tcp_flags: u8,
    pub active_time: f64,
    pub idle_time: f64,
}

/// Generate a flow whose features match the class's envelope.
pub fn synth_flow<R: Rng>(rng: &mut R, class: ThreatClass) -> FlowRecord {
    let src_ip = format!(
        "192.168.{}.{}",
        rng.gen_range(1..=254),
        rng.gen_range(2..=254)
    );
    let dst_ip = format!("10.0.{}.{}", rng.gen_range(1..=254), rng.gen_range(1..=254));
    let idle_time = rng.gen_range(0.0..100.0);

    let (duration, src_bytes, dst_bytes, packets, protocol, tcp_flags, active_time) = match class {
        ThreatClass::Ransomware => (
            rng.gen_range(70.0..95.0),
            rng.gen_range(35_000.0..50_000.0),
            rng.gen_range(10_000.0..30_000.0),
            rng.gen_range(140..=200),
            6,
            [16u8, 24, 25][rng.gen_range(0..3)],
            rng.gen_range(60.0..95.0),
        ),
        ThreatClass::Cryptolocker => (
            rng.gen_range(50.0..85.0),
            rng.gen_range(25_000.0..45_000.0),
            rng.gen_range(8_000.0..25_000.0),
            rng.gen_range(100..=160),
            6,
            if rng.gen_bool(0.5) { 16 } else { 24 },
            rng.gen_range(45.0..80.0),
        ),
        ThreatClass::Locky => (
            rng.gen_range(40.0..75.0),
            rng.gen_range(20_000.0..40_000.0),
            rng.gen_range(5_000.0..20_000.0),
            rng.gen_range(80..=140),
            if rng.gen_bool(0.5) { 6 } else { 17 },
            rng.gen_range(0..=255),
            rng.gen_range(35.0..70.0),
        ),
        ThreatClass::WannaCry => (
            rng.gen_range(60.0..90.0),
            rng.gen_range(30_000.0..48_000.0),
            rng.gen_range(12_000.0..32_000.0),
            rng.gen_range(120..=180),
            if rng.gen_bool(0.5) { 6 } else { 17 },
            [16u8, 17, 24, 25][rng.gen_range(0..4)],
            rng.gen_range(50.0..85.0),
        ),
        ThreatClass::Benign => (
            rng.gen_range(5.0..30.0),
            rng.gen_range(100.0..8_000.0),
            rng.gen_range(500.0..12_000.0),
            rng.gen_range(5..=50),
            if rng.gen_bool(0.5) { 6 } else { 17 },
            rng.gen_range(0..=255),
            rng.gen_range(5.0..25.0),
        ),
    };

    FlowRecord {
        src_ip,
        dst_ip,
        duration,
        protocol,
        src_bytes,
        dst_bytes,
        packets,
        tcp_flags,
        active_time,
        idle_time,
    }
}

/// Detection confidence: benign traffic is always scored 0.95, malicious
/// traffic varies within the model's observed band.
pub fn confidence<R: Rng>(rng: &mut R, class: ThreatClass) -> f64 {
    if class.is_malicious() {
        rng.gen_range(0.75..0.98)
    } else {
        0.95
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_sampling_covers_the_weighted_set() {
        let mut rng = rand::thread_rng();
        let mut saw_malicious = false;
        for _ in 0..500 {
            let c = sample_class(&mut rng);
            saw_malicious |= c.is_malicious();
            assert!(matches!(
                c,
                ThreatClass::Benign
                    | ThreatClass::Cryptolocker
                    | ThreatClass::Locky
                    | ThreatClass::Ransomware
                    | ThreatClass::WannaCry
            ));
        }
        // Malicious weight is 46/48; 500 draws without one would be absurd.
        assert!(saw_malicious);
    }

    #[test]
    fn ransomware_flows_honor_their_envelope() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let f = synth_flow(&mut rng, ThreatClass::Ransomware);
            assert!((70.0..95.0).contains(&f.duration));
            assert!((35_000.0..50_000.0).contains(&f.src_bytes));
            assert!((140..=200).contains(&f.packets));
            assert_eq!(f.protocol, 6);
            assert!([16, 24, 25].contains(&f.tcp_flags));
            assert!(f.src_ip.starts_with("192.168."));
            assert!(f.dst_ip.starts_with("10.0."));
        }
    }

    #[test]
    fn benign_flows_stay_small_and_quiet() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let f = synth_flow(&mut rng, ThreatClass::Benign);
            assert!(f.duration < 30.0);
            assert!(f.src_bytes < 8_000.0);
            assert!(f.packets <= 50);
        }
    }

    #[test]
    fn confidence_bands_per_class() {
        let mut rng = rand::thread_rng();
        assert_eq!(confidence(&mut rng, ThreatClass::Benign), 0.95);
        for _ in 0..100 {
            let c = confidence(&mut rng, ThreatClass::WannaCry);
            assert!((0.75..0.98).contains(&c));
        }
    }
}
