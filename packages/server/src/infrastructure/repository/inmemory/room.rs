//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。プロセス再起動で状態は失われます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, MemberRemoval, PlaybackState, RepositoryError, Room, RoomId, RoomRepository,
    Timestamp,
};

/// インメモリ Room Repository 実装
///
/// Room の所有者はこの Repository のみ。外部にはスナップショット（clone）を返します。
#[derive(Default)]
pub struct InMemoryRoomRepository {
    /// RoomId → Room
    rooms: Mutex<HashMap<RoomId, Room>>,
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn ensure_room(&self, room_id: &RoomId, created_at: Timestamp) -> Room {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(room_id.clone())
            .or_insert_with(|| {
                tracing::info!("Room '{}' created", room_id);
                Room::new(room_id.clone(), created_at)
            })
            .clone()
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    async fn add_member(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
    ) -> Result<(), RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))?;
        room.add_member(connection_id);
        Ok(())
    }

    async fn remove_member(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<MemberRemoval, RepositoryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RepositoryError::RoomNotFound(room_id.to_string()))?;
        room.remove_member(connection_id);

        if room.is_empty() {
            rooms.remove(room_id);
            tracing::info!("Room '{}' is empty and has been deleted", room_id);
            return Ok(MemberRemoval::RoomDeleted);
        }
        Ok(MemberRemoval::Remaining(room.member_count()))
    }

    async fn set_state(&self, room_id: &RoomId, state: PlaybackState) {
        let mut rooms = self.rooms.lock().await;
        match rooms.get_mut(room_id) {
            Some(room) => room.replace_state(state),
            None => tracing::debug!("Ignoring state update for missing room '{}'", room_id),
        }
    }

    async fn member_ids(&self, room_id: &RoomId) -> Vec<ConnectionId> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(room_id)
            .map(|room| room.member_ids())
            .unwrap_or_default()
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut list: Vec<Room> = rooms.values().cloned().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        list
    }
}
