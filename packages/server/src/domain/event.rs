//! クライアントとサーバー間でやり取りするイベント
//!
//! ワイヤ形式（JSON）への変換は Infrastructure 層の DTO が担当する。

use serde_json::Value;

use super::{PlaybackState, RoomId};

/// 存在しないルームへの参加時に返すエラーメッセージ
pub const ROOM_NOT_FOUND_MESSAGE: &str = "Room not found";

/// 再生状態を変更するイベントの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEventKind {
    Play,
    Pause,
    Seek,
    SetVideo,
}

impl PlaybackEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Play => "PLAY",
            Self::Pause => "PAUSE",
            Self::Seek => "SEEK",
            Self::SetVideo => "SET_VIDEO",
        }
    }
}

/// クライアントから受信したイベント（パース済み）
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    CreateRoom {
        room_id: RoomId,
    },
    JoinRoom {
        room_id: RoomId,
    },
    Playback {
        kind: PlaybackEventKind,
        room_id: RoomId,
        state: PlaybackState,
    },
    Chat {
        room_id: RoomId,
        payload: Value,
    },
}

impl ClientEvent {
    /// イベントが対象とするルーム
    pub fn room_id(&self) -> &RoomId {
        match self {
            Self::CreateRoom { room_id }
            | Self::JoinRoom { room_id }
            | Self::Playback { room_id, .. }
            | Self::Chat { room_id, .. } => room_id,
        }
    }

    /// ログ出力用のイベント名
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateRoom { .. } => "CREATE_ROOM",
            Self::JoinRoom { .. } => "JOIN_ROOM",
            Self::Playback { kind, .. } => kind.as_str(),
            Self::Chat { .. } => "CHAT",
        }
    }
}

/// サーバーからクライアントへ送信するメッセージ
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    RoomCreated { room_id: RoomId },
    SyncState { state: PlaybackState },
    Error { message: String },
    Playback {
        kind: PlaybackEventKind,
        state: PlaybackState,
    },
    Chat { payload: Value },
}

impl ServerMessage {
    pub fn room_not_found() -> Self {
        Self::Error {
            message: ROOM_NOT_FOUND_MESSAGE.to_string(),
        }
    }
}
