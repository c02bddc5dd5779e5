//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの上限付き `Sender` を管理
//! - ドメインの `ServerMessage` を JSON にシリアライズして送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `Sender` を受け取り、`try_send` でメッセージを投入します。
//! 受信側（pusher loop）が終了した接続や、キューが上限に達した接続への送信は失敗し、
//! そのメッセージは捨てられます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::error::TrySendError};

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, ServerMessage},
    infrastructure::dto::websocket::OutboundMessage,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::default();
/// pusher.register_client(connection_id, tx).await;
/// pusher.push_to(&connection_id, &ServerMessage::room_not_found()).await?;
/// ```
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    clients: Mutex<HashMap<ConnectionId, PusherChannel>>,
}

/// ServerMessage をワイヤ形式の JSON にエンコード
pub fn encode(message: &ServerMessage) -> Result<String, MessagePushError> {
    serde_json::to_string(&OutboundMessage::from(message))
        .map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
}

/// 送信キューに投入する（待たない）
fn try_deliver(
    connection_id: &ConnectionId,
    sender: &PusherChannel,
    content: String,
) -> Result<(), MessagePushError> {
    sender.try_send(content).map_err(|e| match e {
        TrySendError::Full(_) => MessagePushError::QueueFull(connection_id.to_string()),
        TrySendError::Closed(_) => MessagePushError::PushFailed(format!(
            "connection '{}' is closed",
            connection_id
        )),
    })
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id);
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        message: &ServerMessage,
    ) -> Result<(), MessagePushError> {
        let content = encode(message)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ConnectionNotFound(connection_id.to_string()))?;
        try_deliver(connection_id, sender, content)?;
        tracing::debug!("Pushed message to connection '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(&self, targets: Vec<ConnectionId>, message: &ServerMessage) -> usize {
        let content = match encode(message) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Skipping broadcast: {}", e);
                return 0;
            }
        };
        let clients = self.clients.lock().await;

        let mut delivered = 0;
        for target in targets {
            let Some(sender) = clients.get(&target) else {
                tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    target
                );
                continue;
            };
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = try_deliver(&target, sender, content.clone()) {
                tracing::warn!("Failed to push message to connection '{}': {}", target, e);
                continue;
            }
            delivered += 1;
        }
        tracing::debug!("Broadcasted message to {} connection(s)", delivered);

        delivered
    }
}
