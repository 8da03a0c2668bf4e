use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures_util::{Sink, SinkExt, StreamExt};
use serde_json::Value;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::AppState;

/// WebSocket endpoint for UI clients showing detections as they happen
pub async fn ui_ws(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(|socket| handle_ui_socket(socket, state))
}

/// First message sent to a freshly connected UI client
pub async fn initial_state(state: &AppState) -> Value {
    serde_json::json!({
        "type": "initial_state",
        "table_size": state.table.len(),
        "last_detection": state.detections.last().await,
    })
}

/// Forward broadcast messages until the channel closes or the client goes
/// away. A lagging client skips the overwritten messages and keeps going.
pub async fn forward_broadcasts<S>(mut rx: broadcast::Receiver<String>, sender: &mut S)
where
    S: Sink<Message> + Unpin,
{
    loop {
        match rx.recv().await {
            Ok(msg) => {
                if sender.send(Message::Text(msg.into())).await.is_err() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("UI client lagging, skipped {} updates", skipped);
            }
            Err(RecvError::Closed) => break,
        }
    }
}

async fn handle_ui_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    // Subscribing first may deliver a detection both in the initial state
    // and as a broadcast, but never drops one.
    let rx = state.ui_broadcast.subscribe();

    tracing::debug!("UI client connected");

    let initial = initial_state(&state).await;
    if sender.send(Message::Text(initial.to_string().into())).await.is_err() {
        return;
    }

    let send_task = tokio::spawn(async move { forward_broadcasts(rx, &mut sender).await });

    while let Some(Ok(msg)) = receiver.next().await {
        match msg {
            Message::Ping(data) => {
                // Pong is handled automatically by axum
                tracing::trace!("Ping received: {:?}", data);
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    send_task.abort();
    tracing::debug!("UI client disconnected");
}
