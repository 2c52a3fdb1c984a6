//! Demo detection backend: simulates classified network flows and pushes
//! them to dashboards over WebSocket, with small REST endpoints for health
//! and stats.

mod flow;
mod state;
mod types;
mod ws;

use std::net::SocketAddr;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use rand::Rng;
use tokio::time::sleep;
use tracing::info;
use tracing_subscriber::EnvFilter;

use flow::{confidence, sample_class, synth_flow};
use state::AppState;
use types::{FeedFrame, ModelInfo, ThreatEvent};

const DEFAULT_PORT: u16 = 5002;
/// Jittered pause between detections, like a real capture pipeline's cadence.
const DETECT_MIN_MS: u64 = 23_000;
const DETECT_MAX_MS: u64 = 25_000;

fn parse_port<I: IntoIterator<Item = String>>(args: I, default_port: u16) -> u16 {
    let mut it = args.into_iter();
    let _ = it.next(); // program name
    let mut long: Option<String> = None;
    let mut short: Option<String> = None;
    while let Some(a) = it.next() {
        match a.as_str() {
            "--port" => long = it.next(),
            "-p" => short = it.next(),
            _ if a.starts_with("--port=") => {
                if let Some((_, v)) = a.split_once('=') {
                    long = Some(v.to_string());
                }
            }
            _ => {}
        }
    }
    long.or(short)
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(default_port)
}

/// Fixed detection period override for demos and tests, in milliseconds.
fn period_override_ms() -> Option<u64> {
    std::env::var("THREATWATCH_AGENT_PERIOD_MS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|&ms| ms > 0)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let port = parse_port(std::env::args(), DEFAULT_PORT);
    let state = AppState::new(ModelInfo::demo());

    tokio::spawn(monitor_flows(state.clone()));

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/stats", get(stats))
        .route("/ws", get(ws::ws_handler))
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "threatwatch agent listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy", "service": "threatwatch_agent" }))
}

async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.snapshot().await)
}

/// Detection loop: sleep, synthesize one classified flow, fold it into the
/// counters, broadcast the threat and the fresh counters.
async fn monitor_flows(state: AppState) {
    info!("flow monitoring started");
    loop {
        let delay_ms = match period_override_ms() {
            Some(ms) => ms,
            // thread_rng is a temporary here, never held across an await
            None => rand::thread_rng().gen_range(DETECT_MIN_MS..=DETECT_MAX_MS),
        };
        sleep(Duration::from_millis(delay_ms)).await;

        let (event, class) = {
            let mut rng = rand::thread_rng();
            let class = sample_class(&mut rng);
            let flow = synth_flow(&mut rng, class);
            let event = ThreatEvent {
                timestamp: chrono::Utc::now().to_rfc3339(),
                threat_type: class.label().to_string(),
                confidence: confidence(&mut rng, class),
                source_ip: flow.src_ip,
                dest_ip: flow.dst_ip,
                status: if class.is_malicious() { "BLOCKED" } else { "BENIGN" }.to_string(),
            };
            (event, class)
        };

        state.stats.lock().await.record(class);

        if class.is_malicious() {
            info!(
                threat = %event.threat_type,
                source = %event.source_ip,
                confidence_pct = (event.confidence * 100.0).round() as u64,
                "threat blocked"
            );
        }

        let frames = [
            FeedFrame::NewThreat(event).to_json(),
            FeedFrame::StatsUpdate(state.snapshot().await).to_json(),
        ];
        for frame in frames.into_iter().flatten() {
            // Err just means no dashboard is connected right now.
            let _ = state.feed_tx.send(frame);
        }
    }
}
