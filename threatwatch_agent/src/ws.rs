//! WebSocket upgrade and per-connection handler: greet, then relay the feed.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;

use crate::state::AppState;
use crate::types::FeedFrame;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    debug!("dashboard connected");

    // Greeting: model card first, then the current counters, matching what
    // clients expect before the first detection arrives.
    let greeting = [
        FeedFrame::ModelInfo((*state.model).clone()).to_json(),
        FeedFrame::StatsUpdate(state.snapshot().await).to_json(),
    ];
    for frame in greeting.into_iter().flatten() {
        if socket.send(Message::Text(frame)).await.is_err() {
            return;
        }
    }

    let mut feed = state.feed_tx.subscribe();
    loop {
        tokio::select! {
            frame = feed.recv() => match frame {
                Ok(json) => {
                    if socket.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                // Slow consumer: drop what it missed and keep relaying.
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "dashboard lagging, frames dropped");
                }
                Err(RecvError::Closed) => break,
            },
            msg = socket.recv() => match msg {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(_)) => break,
                // The feed is push-only; inbound frames are ignored.
                Some(Ok(_)) => {}
            },
        }
    }

    debug!("dashboard disconnected");
}
