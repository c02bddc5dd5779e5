//! UseCase: ルーム一覧取得

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

/// ルーム一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 存在する全ルーム（ID 順）
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.list_rooms().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RoomId, Timestamp},
        infrastructure::repository::InMemoryRoomRepository,
    };

    #[tokio::test]
    async fn test_get_rooms_empty() {
        // テスト項目: ルームがない場合は空のリストが返される
        // given (前提条件):
        let usecase = GetRoomsUseCase::new(Arc::new(InMemoryRoomRepository::default()));

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert!(rooms.is_empty());
    }

    #[tokio::test]
    async fn test_get_rooms_lists_existing_rooms() {
        // テスト項目: 作成済みのルームが一覧に含まれる
        // given (前提条件):
        let repository = Arc::new(InMemoryRoomRepository::default());
        let r1 = RoomId::new("r1".to_string()).unwrap();
        repository.ensure_room(&r1, Timestamp::new(1000)).await;
        let usecase = GetRoomsUseCase::new(repository);

        // when (操作):
        let rooms = usecase.execute().await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0].id, r1);
    }
}
