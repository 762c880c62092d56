//! Live WebSocket transport for the agent chat.
//!
//! Connects to the backend's chat endpoint and exposes a sync-friendly
//! channel interface, so the line-oriented CLI loop never has to be async.
//! Frame composition and pending-request tracking stay in
//! [`ChatExchange`](crate::chat::ChatExchange); this module only moves
//! frames.

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::chat::{ChatRequest, ChatResponse, decode_response, encode_request};
use crate::error::ChatError;

/// Handle to a background WebSocket connection.
///
/// `send()` queues an outgoing frame and `recv_timeout()`/`try_recv()` pull
/// agent responses, all without blocking on the socket itself.
pub struct LiveChat {
    tx: mpsc::Sender<ChatRequest>,
    rx: mpsc::Receiver<ChatResponse>,
    /// Set once the background task has gone away.
    disconnected: bool,
}

impl LiveChat {
    /// Spawn a background tokio runtime plus WebSocket connection to `url`.
    pub fn connect(url: &str) -> Result<Self, ChatError> {
        let (out_tx, out_rx) = mpsc::channel::<ChatRequest>();
        let (in_tx, in_rx) = mpsc::channel::<ChatResponse>();

        let url = url.to_string();
        thread::Builder::new()
            .name("ws-chat".into())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        let _ = in_tx.send(ChatResponse::Error {
                            message: format!("failed to create tokio runtime: {e}"),
                        });
                        return;
                    }
                };

                rt.block_on(async move {
                    ws_task(url, out_rx, in_tx).await;
                });
            })
            .map_err(|e| ChatError::Connection {
                message: format!("failed to spawn chat thread: {e}"),
            })?;

        Ok(Self {
            tx: out_tx,
            rx: in_rx,
            disconnected: false,
        })
    }

    /// Queue an outgoing frame (non-blocking).
    pub fn send(&self, request: ChatRequest) {
        let _ = self.tx.send(request);
    }

    /// Wait up to `timeout` for the next agent response.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<ChatResponse> {
        match self.rx.recv_timeout(timeout) {
            Ok(response) => Some(response),
            Err(mpsc::RecvTimeoutError::Disconnected) => self.lost(),
            Err(mpsc::RecvTimeoutError::Timeout) => None,
        }
    }

    /// Poll for a queued agent response (non-blocking).
    pub fn try_recv(&mut self) -> Option<ChatResponse> {
        match self.rx.try_recv() {
            Ok(response) => Some(response),
            Err(mpsc::TryRecvError::Disconnected) => self.lost(),
            Err(mpsc::TryRecvError::Empty) => None,
        }
    }

    /// Whether the connection has been lost.
    pub fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    fn lost(&mut self) -> Option<ChatResponse> {
        if self.disconnected {
            None
        } else {
            self.disconnected = true;
            Some(ChatResponse::Error {
                message: "connection to the agent lost".into(),
            })
        }
    }
}

/// Background async task: connects, then relays frames in both directions.
async fn ws_task(
    url: String,
    outbound: mpsc::Receiver<ChatRequest>,
    inbound: mpsc::Sender<ChatResponse>,
) {
    use futures_util::{SinkExt, StreamExt};
    use tokio_tungstenite::tungstenite;

    let ws_stream = match tokio_tungstenite::connect_async(&url).await {
        Ok((stream, _)) => stream,
        Err(e) => {
            let _ = inbound.send(ChatResponse::Error {
                message: format!("failed to connect to {url}: {e}"),
            });
            return;
        }
    };

    let (mut sink, mut stream) = ws_stream.split();

    // Forward outgoing frames, polling the sync mpsc from async context.
    let send_handle = tokio::spawn(async move {
        loop {
            // Yield to avoid busy-spinning; check every 50ms.
            tokio::time::sleep(Duration::from_millis(50)).await;
            match outbound.try_recv() {
                Ok(request) => {
                    let json = match encode_request(&request) {
                        Ok(j) => j,
                        Err(_) => continue,
                    };
                    if sink
                        .send(tungstenite::Message::Text(json.into()))
                        .await
                        .is_err()
                    {
                        break;
                    }
                }
                Err(mpsc::TryRecvError::Disconnected) => break,
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }
    });

    // Relay incoming frames.
    while let Some(result) = stream.next().await {
        match result {
            Ok(tungstenite::Message::Text(text)) => match decode_response(&text) {
                Ok(response) => {
                    if inbound.send(response).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    let _ = inbound.send(ChatResponse::Error {
                        message: format!("unreadable agent frame: {e}"),
                    });
                }
            },
            Ok(tungstenite::Message::Close(_)) => break,
            Err(e) => {
                let _ = inbound.send(ChatResponse::Error {
                    message: format!("connection error: {e}"),
                });
                break;
            }
            _ => {}
        }
    }

    send_handle.abort();
}
