//! Synchronization Engine
//!
//! 受信イベントごとに呼び出されるディスパッチャ。自身は状態を持たず、
//! Room Directory と Connection Registry をユースケース経由で操作します。
//!
//! ## 排他制御
//!
//! tokio のマルチスレッドランタイムでは接続ごとのタスクが並行に動くため、
//! すべてのイベント処理と切断処理を 1 つのゲート（`Mutex<()>`）の中で実行し、
//! 1 イベントずつ完了まで処理する。ゲートの中で待つのは Repository / Registry /
//! MessagePusher のロックのみで、送信はチャンネルへの投入なのでブロックしない。

use std::sync::Arc;

use tokio::sync::Mutex;
use watchsync_shared::time::Clock;

use crate::domain::{
    ClientEvent, ConnectionId, ConnectionRegistry, MessagePusher, PusherChannel, RoomRepository,
    ServerMessage,
};

use super::{
    CreateRoomUseCase, JoinRoomError, JoinRoomUseCase, LeaveRoomUseCase, LeftRoom,
    RelayChatUseCase, RelayPlaybackUseCase,
};

/// イベントディスパッチャ
pub struct SyncEngine {
    /// 1 イベントずつ処理するためのゲート
    gate: Mutex<()>,
    message_pusher: Arc<dyn MessagePusher>,
    create_room: CreateRoomUseCase,
    join_room: JoinRoomUseCase,
    relay_playback: RelayPlaybackUseCase,
    relay_chat: RelayChatUseCase,
    leave_room: Arc<LeaveRoomUseCase>,
}

impl SyncEngine {
    /// 新しい SyncEngine を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let leave_room = Arc::new(LeaveRoomUseCase::new(
            repository.clone(),
            registry.clone(),
            message_pusher.clone(),
        ));

        Self {
            gate: Mutex::new(()),
            create_room: CreateRoomUseCase::new(
                repository.clone(),
                registry.clone(),
                message_pusher.clone(),
                leave_room.clone(),
                clock,
            ),
            join_room: JoinRoomUseCase::new(
                repository.clone(),
                registry,
                message_pusher.clone(),
                leave_room.clone(),
            ),
            relay_playback: RelayPlaybackUseCase::new(repository.clone(), message_pusher.clone()),
            relay_chat: RelayChatUseCase::new(repository, message_pusher.clone()),
            leave_room,
            message_pusher,
        }
    }

    /// 新しい接続の送信チャンネルを登録
    pub async fn connect(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
        tracing::info!("Connection '{}' opened", connection_id);
    }

    /// 受信イベントを処理
    ///
    /// エラーは送信者への ERROR 返信（JOIN_ROOM のみ）かログ出力で完結し、呼び出し元には返さない。
    pub async fn handle_event(&self, sender: &ConnectionId, event: ClientEvent) {
        let _gate = self.gate.lock().await;
        tracing::debug!(
            "Handling {} for room '{}' from '{}'",
            event.name(),
            event.room_id(),
            sender
        );

        match event {
            ClientEvent::CreateRoom { room_id } => {
                if let Err(e) = self.create_room.execute(sender, room_id).await {
                    tracing::warn!("CREATE_ROOM from '{}' failed: {}", sender, e);
                }
            }
            ClientEvent::JoinRoom { room_id } => {
                match self.join_room.execute(sender, room_id).await {
                    Ok(_) => {}
                    Err(JoinRoomError::RoomNotFound(id)) => {
                        tracing::info!("Connection '{}' tried to join missing room '{}'", sender, id);
                        let reply = ServerMessage::room_not_found();
                        if let Err(e) = self.message_pusher.push_to(sender, &reply).await {
                            tracing::warn!("Failed to send ERROR to '{}': {}", sender, e);
                        }
                    }
                }
            }
            ClientEvent::Playback {
                kind,
                room_id,
                state,
            } => {
                if let Err(e) = self
                    .relay_playback
                    .execute(sender, &room_id, kind, state)
                    .await
                {
                    tracing::debug!("Ignoring {} from '{}': {}", kind.as_str(), sender, e);
                }
            }
            ClientEvent::Chat { room_id, payload } => {
                if let Err(e) = self.relay_chat.execute(sender, &room_id, payload).await {
                    tracing::debug!("Ignoring CHAT from '{}': {}", sender, e);
                }
            }
        }
    }

    /// 切断した接続のクリーンアップ
    pub async fn disconnect(&self, connection_id: &ConnectionId) -> Option<LeftRoom> {
        let _gate = self.gate.lock().await;
        let left = self.leave_room.execute(connection_id).await;
        tracing::info!("Connection '{}' closed", connection_id);
        left
    }
}
