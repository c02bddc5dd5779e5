//! InMemory Connection Registry 実装
//!
//! 接続ごとに「現在どのルームにいるか」だけを保持します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, ConnectionRegistry, RoomId};

/// インメモリ Connection Registry 実装
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    /// ConnectionId → 現在のルーム
    rooms_by_connection: Mutex<HashMap<ConnectionId, RoomId>>,
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn set_room(&self, connection_id: &ConnectionId, room_id: RoomId) {
        let mut map = self.rooms_by_connection.lock().await;
        map.insert(*connection_id, room_id);
    }

    async fn get_room(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        let map = self.rooms_by_connection.lock().await;
        map.get(connection_id).cloned()
    }

    async fn clear(&self, connection_id: &ConnectionId) {
        let mut map = self.rooms_by_connection.lock().await;
        map.remove(connection_id);
    }

    async fn count(&self) -> usize {
        let map = self.rooms_by_connection.lock().await;
        map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_unknown_connection_has_no_room() {
        // テスト項目: 未登録の接続の現在のルームは None
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::default();

        // when (操作):
        let result = registry.get_room(&ConnectionId::generate()).await;

        // then (期待する結果):
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_set_room_overwrites_previous_association() {
        // テスト項目: set_room は以前の関連付けを上書きする
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::default();
        let alice = ConnectionId::generate();
        registry.set_room(&alice, room_id("r1")).await;

        // when (操作):
        registry.set_room(&alice, room_id("r2")).await;

        // then (期待する結果):
        assert_eq!(registry.get_room(&alice).await, Some(room_id("r2")));
        assert_eq!(registry.count().await, 1);
    }

    #[tokio::test]
    async fn test_clear_removes_association() {
        // テスト項目: clear で関連付けが解除され、未登録の接続の clear も問題なく処理される
        // given (前提条件):
        let registry = InMemoryConnectionRegistry::default();
        let alice = ConnectionId::generate();
        registry.set_room(&alice, room_id("r1")).await;

        // when (操作):
        registry.clear(&alice).await;
        registry.clear(&ConnectionId::generate()).await;

        // then (期待する結果):
        assert_eq!(registry.get_room(&alice).await, None);
        assert_eq!(registry.count().await, 0);
    }
}
