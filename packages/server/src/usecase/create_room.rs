//! UseCase: ルーム作成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - CreateRoomUseCase::execute() メソッド
//! - ルームの遅延作成とメンバー登録、ROOM_CREATED の返信
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ルームの作成
//! - 冪等性：既存ルームへの CREATE_ROOM は既存のメンバーと状態を保持する
//! - 自動退出：別ルームにいる接続は先に退出する

use std::sync::Arc;

use watchsync_shared::time::Clock;

use crate::domain::{
    ConnectionId, ConnectionRegistry, MessagePusher, RoomId, RoomRepository, ServerMessage,
    Timestamp,
};

use super::{error::CreateRoomError, leave_room::LeaveRoomUseCase};

/// ルーム作成のユースケース
pub struct CreateRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    leave_room: Arc<LeaveRoomUseCase>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    /// 新しい CreateRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        leave_room: Arc<LeaveRoomUseCase>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            registry,
            message_pusher,
            leave_room,
            clock,
        }
    }

    /// ルーム作成を実行
    ///
    /// ルームがなければ作成し、送信者をメンバーにして ROOM_CREATED を送信者にだけ返す。
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        room_id: RoomId,
    ) -> Result<(), CreateRoomError> {
        // 1. 別ルームにいる場合は先に退出
        self.leave_room
            .leave_if_other_room(connection_id, &room_id)
            .await;

        // 2. ルームを取得または作成し、メンバーに追加
        let created_at = Timestamp::new(self.clock.now_millis());
        self.repository.ensure_room(&room_id, created_at).await;
        self.repository
            .add_member(&room_id, *connection_id)
            .await?;
        self.registry.set_room(connection_id, room_id.clone()).await;

        // 3. 送信者にだけ返信
        let reply = ServerMessage::RoomCreated { room_id };
        if let Err(e) = self.message_pusher.push_to(connection_id, &reply).await {
            tracing::warn!("Failed to send ROOM_CREATED to '{}': {}", connection_id, e);
        }

        Ok(())
    }
}
