//! UseCase 層
//!
//! 受信イベントごとのユースケースと、それらを束ねる `SyncEngine` を提供します。

mod create_room;
mod error;
mod get_health;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod leave_room;
mod relay_chat;
mod relay_playback;
mod sync_engine;

pub use create_room::CreateRoomUseCase;
pub use error::{CreateRoomError, GetRoomDetailError, JoinRoomError, RelayError};
pub use get_health::{GetHealthUseCase, HealthSummary};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::{LeaveRoomUseCase, LeftRoom};
pub use relay_chat::RelayChatUseCase;
pub use relay_playback::RelayPlaybackUseCase;
pub use sync_engine::SyncEngine;
