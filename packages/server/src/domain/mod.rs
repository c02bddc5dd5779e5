//! ドメイン層
//!
//! ルーム・接続・再生状態のモデルと、ユースケース層が依存するインターフェース
//! （Repository / Registry / MessagePusher）を定義します。

pub mod entity;
pub mod error;
pub mod event;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{PlaybackState, Room};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use event::{ClientEvent, PlaybackEventKind, ROOM_NOT_FOUND_MESSAGE, ServerMessage};
pub use message_pusher::{MessagePusher, PUSHER_CHANNEL_CAPACITY, PusherChannel, pusher_channel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use repository::{ConnectionRegistry, MemberRemoval, RoomRepository};
pub use value_object::{ConnectionId, RoomId, Timestamp};
