//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, pusher_channel},
    infrastructure::dto::conversion::parse_client_event,
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let connection_id = ConnectionId::generate();
    tracing::debug!("Upgrading connection '{}'", connection_id);

    ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// The task ends when the socket stops accepting writes or when the channel is dropped on
/// unregister. Messages queued for a socket that already failed are discarded.
fn pusher_loop(
    mut rx: mpsc::Receiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, connection_id: ConnectionId) {
    let (sender, mut receiver) = socket.split();

    // Outbound: engine → channel → socket
    let (tx, rx) = pusher_channel();
    state.sync_engine.connect(connection_id, tx).await;
    let send_task = pusher_loop(rx, sender);

    // Inbound runs on this task; each event completes before disconnect cleanup starts.
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                break;
            }
        };

        let text = match msg {
            Message::Text(text) => text.as_str().to_owned(),
            Message::Binary(bytes) => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => text,
                Err(_) => {
                    tracing::debug!("Dropping non UTF-8 binary frame from '{}'", connection_id);
                    continue;
                }
            },
            Message::Close(_) => {
                tracing::info!("Connection '{}' requested close", connection_id);
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            _ => continue,
        };

        match parse_client_event(&text) {
            Ok(event) => state.sync_engine.handle_event(&connection_id, event).await,
            Err(e) => {
                tracing::debug!("Dropping inbound message from '{}': {}", connection_id, e);
            }
        }
    }

    // Cleanup: leave the current room and drop the outbound channel
    if let Some(left) = state.sync_engine.disconnect(&connection_id).await {
        tracing::debug!(
            "Connection '{}' removed from room '{}' ({:?})",
            connection_id,
            left.room_id,
            left.removal
        );
    }
    send_task.abort();
}
