//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::{GetHealthUseCase, GetRoomDetailUseCase, GetRoomsUseCase, SyncEngine};

/// Shared application state
pub struct AppState {
    /// Dispatcher for inbound WebSocket events and disconnect cleanup
    pub sync_engine: Arc<SyncEngine>,
    /// GetHealthUseCase（稼働状況取得のユースケース）
    pub get_health_usecase: Arc<GetHealthUseCase>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
