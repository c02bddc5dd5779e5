//! UseCase: ルーム退出処理
//!
//! 切断時のクリーンアップと、別ルームへの作成・参加時の自動退出で使われます。
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 最後のメンバーの退出でルームが削除されること
//! - ルームに属していない接続の退出は何もしないこと

use std::sync::Arc;

use crate::domain::{
    ConnectionId, ConnectionRegistry, MemberRemoval, MessagePusher, RoomId, RoomRepository,
};

/// 退出したルームと、その結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftRoom {
    pub room_id: RoomId,
    pub removal: MemberRemoval,
}

/// ルーム退出のユースケース
pub struct LeaveRoomUseCase {
    /// Repository（Room Directory）
    repository: Arc<dyn RoomRepository>,
    /// 接続ごとの現在のルーム
    registry: Arc<dyn ConnectionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            registry,
            message_pusher,
        }
    }

    /// 切断した接続をクリーンアップ
    ///
    /// 現在のルームから退出し、送信チャンネルの登録も解除する。
    ///
    /// # Returns
    ///
    /// * `Some(LeftRoom)` - ルームから退出した
    /// * `None` - どのルームにも属していなかった
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<LeftRoom> {
        let left = self.leave_current_room(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;
        left
    }

    /// 現在のルームから退出する（送信チャンネルは残す）
    ///
    /// 自動退出（別ルームへの作成・参加）でも使う。
    pub async fn leave_current_room(&self, connection_id: &ConnectionId) -> Option<LeftRoom> {
        let room_id = self.registry.get_room(connection_id).await?;
        self.registry.clear(connection_id).await;

        match self.repository.remove_member(&room_id, connection_id).await {
            Ok(removal) => {
                tracing::info!("Connection '{}' left room '{}'", connection_id, room_id);
                Some(LeftRoom { room_id, removal })
            }
            Err(e) => {
                tracing::warn!(
                    "Connection '{}' was registered to a missing room: {}",
                    connection_id,
                    e
                );
                None
            }
        }
    }

    /// `next_room` とは別のルームにいる場合だけ退出する
    pub async fn leave_if_other_room(
        &self,
        connection_id: &ConnectionId,
        next_room: &RoomId,
    ) -> Option<LeftRoom> {
        match self.registry.get_room(connection_id).await {
            Some(current) if &current != next_room => {
                self.leave_current_room(connection_id).await
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{MockMessagePusher, Timestamp},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, registry::InMemoryConnectionRegistry,
            repository::InMemoryRoomRepository,
        },
    };

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    fn create_usecase() -> (
        LeaveRoomUseCase,
        Arc<InMemoryRoomRepository>,
        Arc<InMemoryConnectionRegistry>,
    ) {
        let repository = Arc::new(InMemoryRoomRepository::default());
        let registry = Arc::new(InMemoryConnectionRegistry::default());
        let usecase = LeaveRoomUseCase::new(
            repository.clone(),
            registry.clone(),
            Arc::new(WebSocketMessagePusher::default()),
        );
        (usecase, repository, registry)
    }

    async fn join(
        repository: &InMemoryRoomRepository,
        registry: &InMemoryConnectionRegistry,
        connection_id: ConnectionId,
        room: &RoomId,
    ) {
        repository.ensure_room(room, Timestamp::new(1000)).await;
        repository.add_member(room, connection_id).await.unwrap();
        registry.set_room(&connection_id, room.clone()).await;
    }

    #[tokio::test]
    async fn test_leave_keeps_room_with_remaining_members() {
        // テスト項目: 他のメンバーが残っている場合、ルームは削除されない
        // given (前提条件):
        let (usecase, repository, registry) = create_usecase();
        let r1 = room_id("r1");
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        join(&repository, &registry, alice, &r1).await;
        join(&repository, &registry, bob, &r1).await;

        // when (操作):
        let result = usecase.execute(&bob).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Some(LeftRoom {
                room_id: r1.clone(),
                removal: MemberRemoval::Remaining(1),
            })
        );
        assert!(repository.get_room(&r1).await.is_some());
        assert_eq!(registry.get_room(&bob).await, None);
    }

    #[tokio::test]
    async fn test_leave_last_member_deletes_room() {
        // テスト項目: 最後のメンバーが退出するとルームが削除される
        // given (前提条件):
        let (usecase, repository, registry) = create_usecase();
        let r1 = room_id("r1");
        let alice = ConnectionId::generate();
        join(&repository, &registry, alice, &r1).await;

        // when (操作):
        let result = usecase.execute(&alice).await;

        // then (期待する結果):
        assert_eq!(result.map(|left| left.removal), Some(MemberRemoval::RoomDeleted));
        assert!(repository.get_room(&r1).await.is_none());
    }

    #[tokio::test]
    async fn test_leave_without_room_is_noop() {
        // テスト項目: どのルームにも属していない接続の退出は何もしない
        // given (前提条件):
        let (usecase, _repository, _registry) = create_usecase();

        // when (操作):
        let result = usecase.execute(&ConnectionId::generate()).await;

        // then (期待する結果):
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_leave_if_other_room_skips_same_room() {
        // テスト項目: 同じルームへの再参加では退出しない
        // given (前提条件):
        let (usecase, repository, registry) = create_usecase();
        let r1 = room_id("r1");
        let alice = ConnectionId::generate();
        join(&repository, &registry, alice, &r1).await;

        // when (操作):
        let same = usecase.leave_if_other_room(&alice, &r1).await;
        let other = usecase.leave_if_other_room(&alice, &room_id("r2")).await;

        // then (期待する結果):
        assert_eq!(same, None);
        assert_eq!(other.map(|left| left.room_id), Some(r1.clone()));
        assert!(repository.get_room(&r1).await.is_none());
    }

    #[tokio::test]
    async fn test_execute_unregisters_channel() {
        // テスト項目: 切断時は送信チャンネルの登録が 1 回だけ解除される
        // given (前提条件):
        let alice = ConnectionId::generate();
        let mut message_pusher = MockMessagePusher::new();
        message_pusher
            .expect_unregister_client()
            .withf(move |id| *id == alice)
            .times(1)
            .returning(|_| ());
        let usecase = LeaveRoomUseCase::new(
            Arc::new(InMemoryRoomRepository::default()),
            Arc::new(InMemoryConnectionRegistry::default()),
            Arc::new(message_pusher),
        );

        // when (操作):
        let result = usecase.execute(&alice).await;

        // then (期待する結果): MockMessagePusher の drop 時に呼び出し回数が検証される
        assert_eq!(result, None);
    }
}
