//! Client subscription feed
//!
//! `GET /api/events` upgrades to a WebSocket and streams every bus message
//! as JSON text. Clients treat the messages as refetch hints; a dropped or
//! lagging connection just reconnects and refetches, so nothing is
//! replayed here.

use axum::{
    Router,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
    routing::get,
};
use tokio::sync::broadcast::error::RecvError;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/events", get(subscribe))
}

async fn subscribe(ws: WebSocketUpgrade, State(state): State<ServerState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| feed(socket, state))
}

async fn feed(mut socket: WebSocket, state: ServerState) {
    let mut rx = state.bus.subscribe();
    let shutdown = state.bus.shutdown_token().clone();
    tracing::debug!(subscribers = state.bus.subscriber_count(), "Feed client connected");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => {
                let _ = socket.send(Message::Close(None)).await;
                break;
            }
            received = rx.recv() => {
                match received {
                    Ok(msg) => {
                        let Ok(text) = serde_json::to_string(&msg) else {
                            continue;
                        };
                        if socket.send(Message::Text(text.into())).await.is_err() {
                            break;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        // Client fell behind; it will refetch on the next signal
                        tracing::debug!(skipped, "Feed client lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            inbound = socket.recv() => {
                match inbound {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // clients only listen; ignore anything sent
                    Some(Err(_)) => break,
                }
            }
        }
    }

    tracing::debug!("Feed client disconnected");
}
