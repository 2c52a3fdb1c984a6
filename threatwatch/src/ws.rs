//! WebSocket transport: connect, read pushed frames, reconnect with backoff.

use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::sleep;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

use crate::feed::{Backoff, FeedEvent};
use crate::types::FeedFrame;

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Open the push channel once. The caller handles retry.
pub async fn connect(url: &str) -> anyhow::Result<WsStream> {
    let (ws, _) = connect_async(url).await?;
    Ok(ws)
}

/// Read loop driven by the session: connect, signal `Connected`, forward every
/// parsable frame, signal `Disconnected` on loss, then sleep and retry.
/// Runs until the session drops the receiving end.
pub async fn run_reader(url: String, backoff: Backoff, tx: mpsc::Sender<FeedEvent>) {
    let mut delay = backoff.initial;
    loop {
        match connect(&url).await {
            Ok(mut ws) => {
                if tx.send(FeedEvent::Connected).await.is_err() {
                    return;
                }
                delay = backoff.initial;
                while let Some(msg) = ws.next().await {
                    match msg {
                        Ok(Message::Text(raw)) => {
                            // Unknown events and garbage degrade silently.
                            if let Some(frame) = FeedFrame::parse(&raw) {
                                if tx.send(FeedEvent::Frame(frame)).await.is_err() {
                                    return;
                                }
                            }
                        }
                        Ok(Message::Close(_)) | Err(_) => break,
                        _ => {}
                    }
                }
                if tx.send(FeedEvent::Disconnected).await.is_err() {
                    return;
                }
            }
            Err(_) => {
                // Connect failures are silent; the badge already says
                // Disconnected.
            }
        }
        sleep(delay).await;
        delay = backoff.next_delay(delay);
    }
}
