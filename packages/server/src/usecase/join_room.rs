//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 既存ルームへの参加と SYNC_STATE による現在の再生状態の送信
//!
//! ### どのような状況を想定しているか
//! - 正常系：デフォルト状態のルームへの参加、再生状態が更新済みのルームへの参加
//! - 異常系：存在しないルームへの参加（状態は変化しない）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionRegistry, MessagePusher, PlaybackState, RoomId, RoomRepository,
    ServerMessage,
};

use super::{error::JoinRoomError, leave_room::LeaveRoomUseCase};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    leave_room: Arc<LeaveRoomUseCase>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        leave_room: Arc<LeaveRoomUseCase>,
    ) -> Self {
        Self {
            repository,
            registry,
            message_pusher,
            leave_room,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Returns
    ///
    /// * `Ok(PlaybackState)` - 参加成功（送信者に SYNC_STATE で送った再生状態）
    /// * `Err(JoinRoomError::RoomNotFound)` - ルームが存在しない（何も変更しない）
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
    ) -> Result<PlaybackState, JoinRoomError> {
        // 1. ルームの存在確認（作成はしない）
        if self.repository.get_room(&room_id).await.is_none() {
            return Err(JoinRoomError::RoomNotFound(room_id.into_string()));
        }

        // 2. 別ルームにいる場合は先に退出
        self.leave_room
            .leave_if_other_room(connection_id, &room_id)
            .await;

        // 3. メンバーに追加
        self.repository
            .add_member(&room_id, *connection_id)
            .await
            .map_err(|_| JoinRoomError::RoomNotFound(room_id.to_string()))?;
        self.registry.set_room(connection_id, room_id.clone()).await;

        // 4. 現在の再生状態を送信者にだけ送る
        let state = self
            .repository
            .get_room(&room_id)
            .await
            .map(|room| room.state)
            .ok_or_else(|| JoinRoomError::RoomNotFound(room_id.to_string()))?;
        let reply = ServerMessage::SyncState {
            state: state.clone(),
        };
        if let Err(e) = self.message_pusher.push_to(connection_id, &reply).await {
            tracing::warn!("Failed to send SYNC_STATE to '{}': {}", connection_id, e);
        }

        Ok(state)
    }
}
