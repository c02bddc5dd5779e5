//! Conversion logic between wire DTOs and domain events.

use thiserror::Error;

use crate::domain::{
    ClientEvent, PlaybackEventKind, PlaybackState, Room, RoomId, ServerMessage, ValueObjectError,
};
use crate::infrastructure::dto::{
    http::{RoomDetailDto, RoomSummaryDto},
    websocket::{InboundMessage, MessageType, OutboundMessage},
};
use watchsync_shared::time::timestamp_to_rfc3339;

/// Reasons an inbound frame is dropped before reaching the engine.
#[derive(Debug, Error)]
pub enum InboundError {
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unknown message type '{0}'")]
    UnknownType(String),

    #[error("message type '{0}' cannot be sent by a client")]
    NotClientEvent(String),

    #[error("missing roomId")]
    MissingRoomId,

    #[error("invalid roomId: {0}")]
    InvalidRoomId(#[from] ValueObjectError),

    #[error("missing payload")]
    MissingPayload,
}

/// Parse a text frame into a domain event.
pub fn parse_client_event(text: &str) -> Result<ClientEvent, InboundError> {
    let inbound: InboundMessage = serde_json::from_str(text)?;
    ClientEvent::try_from(inbound)
}

fn parse_message_type(value: &str) -> Result<MessageType, InboundError> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| InboundError::UnknownType(value.to_string()))
}

fn playback_event(
    kind: PlaybackEventKind,
    room_id: RoomId,
    payload: Option<serde_json::Value>,
) -> Result<ClientEvent, InboundError> {
    let state = PlaybackState::new(payload.ok_or(InboundError::MissingPayload)?);
    Ok(ClientEvent::Playback {
        kind,
        room_id,
        state,
    })
}

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<InboundMessage> for ClientEvent {
    type Error = InboundError;

    fn try_from(dto: InboundMessage) -> Result<Self, Self::Error> {
        let message_type = parse_message_type(&dto.r#type)?;
        let room_id = RoomId::new(dto.room_id.ok_or(InboundError::MissingRoomId)?)?;

        match message_type {
            MessageType::CreateRoom => Ok(ClientEvent::CreateRoom { room_id }),
            MessageType::JoinRoom => Ok(ClientEvent::JoinRoom { room_id }),
            MessageType::Play => playback_event(PlaybackEventKind::Play, room_id, dto.payload),
            MessageType::Pause => playback_event(PlaybackEventKind::Pause, room_id, dto.payload),
            MessageType::Seek => playback_event(PlaybackEventKind::Seek, room_id, dto.payload),
            MessageType::SetVideo => {
                playback_event(PlaybackEventKind::SetVideo, room_id, dto.payload)
            }
            MessageType::Chat => {
                let payload = dto.payload.ok_or(InboundError::MissingPayload)?;
                Ok(ClientEvent::Chat { room_id, payload })
            }
            MessageType::RoomCreated | MessageType::SyncState | MessageType::Error => {
                Err(InboundError::NotClientEvent(dto.r#type))
            }
        }
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<PlaybackEventKind> for MessageType {
    fn from(kind: PlaybackEventKind) -> Self {
        match kind {
            PlaybackEventKind::Play => Self::Play,
            PlaybackEventKind::Pause => Self::Pause,
            PlaybackEventKind::Seek => Self::Seek,
            PlaybackEventKind::SetVideo => Self::SetVideo,
        }
    }
}

impl From<&ServerMessage> for OutboundMessage {
    fn from(message: &ServerMessage) -> Self {
        let empty = |r#type: MessageType| OutboundMessage {
            r#type,
            room_id: None,
            payload: None,
            message: None,
        };

        match message {
            ServerMessage::RoomCreated { room_id } => OutboundMessage {
                room_id: Some(room_id.to_string()),
                ..empty(MessageType::RoomCreated)
            },
            ServerMessage::SyncState { state } => OutboundMessage {
                payload: Some(state.as_value().clone()),
                ..empty(MessageType::SyncState)
            },
            // payload.message にも同じ文言を入れる
            ServerMessage::Error { message } => OutboundMessage {
                message: Some(message.clone()),
                payload: Some(serde_json::json!({ "message": message })),
                ..empty(MessageType::Error)
            },
            ServerMessage::Playback { kind, state } => OutboundMessage {
                payload: Some(state.as_value().clone()),
                ..empty((*kind).into())
            },
            ServerMessage::Chat { payload } => OutboundMessage {
                payload: Some(payload.clone()),
                ..empty(MessageType::Chat)
            },
        }
    }
}

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.to_string(),
            member_count: room.member_count(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<Room> for RoomDetailDto {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.to_string(),
            member_count: room.member_count(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
            state: room.state.into_value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;
    use serde_json::json;

    fn room_id(value: &str) -> RoomId {
        RoomId::new(value.to_string()).unwrap()
    }

    #[test]
    fn test_parse_create_room() {
        // テスト項目: CREATE_ROOM が payload なしでもパースされる
        // given (前提条件):
        let text = r#"{"type":"CREATE_ROOM","roomId":"r1"}"#;

        // when (操作):
        let event = parse_client_event(text).unwrap();

        // then (期待する結果):
        assert_eq!(event, ClientEvent::CreateRoom { room_id: room_id("r1") });
    }

    #[test]
    fn test_parse_set_video_keeps_payload_opaque() {
        // テスト項目: SET_VIDEO の payload は解釈されずにそのまま保持される
        // given (前提条件):
        let text = r#"{"type":"SET_VIDEO","roomId":"r1","payload":{"src":"x","time":42,"playing":true,"extra":[1,2]}}"#;

        // when (操作):
        let event = parse_client_event(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::Playback {
                kind: PlaybackEventKind::SetVideo,
                room_id: room_id("r1"),
                state: PlaybackState::new(
                    json!({"src": "x", "time": 42, "playing": true, "extra": [1, 2]})
                ),
            }
        );
    }

    #[test]
    fn test_parse_chat_accepts_any_payload_shape() {
        // テスト項目: CHAT の payload は文字列でもオブジェクトでもよい
        // given (前提条件):
        let text = r#"{"type":"CHAT","roomId":"r1","payload":"hello"}"#;

        // when (操作):
        let event = parse_client_event(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::Chat {
                room_id: room_id("r1"),
                payload: json!("hello"),
            }
        );
    }

    #[test]
    fn test_parse_rejects_non_json() {
        // テスト項目: JSON でない入力は Malformed になる
        // given (前提条件):
        let text = "not json at all";

        // when (操作):
        let result = parse_client_event(text);

        // then (期待する結果):
        assert!(matches!(result, Err(InboundError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        // テスト項目: 未知のイベント種別は UnknownType になる
        // given (前提条件):
        let text = r#"{"type":"REWIND","roomId":"r1","payload":{}}"#;

        // when (操作):
        let result = parse_client_event(text);

        // then (期待する結果):
        assert!(matches!(result, Err(InboundError::UnknownType(t)) if t == "REWIND"));
    }

    #[test]
    fn test_parse_rejects_server_only_type() {
        // テスト項目: サーバー送信専用の種別をクライアントが送っても受け付けない
        // given (前提条件):
        let text = r#"{"type":"SYNC_STATE","roomId":"r1","payload":{}}"#;

        // when (操作):
        let result = parse_client_event(text);

        // then (期待する結果):
        assert!(matches!(result, Err(InboundError::NotClientEvent(_))));
    }

    #[test]
    fn test_parse_rejects_missing_or_empty_room_id() {
        // テスト項目: roomId がない、または空の場合はドロップ対象になる
        // given (前提条件):
        let missing = r#"{"type":"JOIN_ROOM"}"#;
        let empty = r#"{"type":"JOIN_ROOM","roomId":""}"#;

        // when (操作):
        let missing_result = parse_client_event(missing);
        let empty_result = parse_client_event(empty);

        // then (期待する結果):
        assert!(matches!(missing_result, Err(InboundError::MissingRoomId)));
        assert!(matches!(
            empty_result,
            Err(InboundError::InvalidRoomId(ValueObjectError::RoomIdEmpty))
        ));
    }

    #[test]
    fn test_parse_rejects_playback_without_payload() {
        // テスト項目: payload のない PLAY はドロップ対象になる
        // given (前提条件):
        let text = r#"{"type":"PLAY","roomId":"r1"}"#;

        // when (操作):
        let result = parse_client_event(text);

        // then (期待する結果):
        assert!(matches!(result, Err(InboundError::MissingPayload)));
    }

    #[test]
    fn test_outbound_room_created_json() {
        // テスト項目: ROOM_CREATED は roomId のみを含む
        // given (前提条件):
        let message = ServerMessage::RoomCreated {
            room_id: room_id("r1"),
        };

        // when (操作):
        let value = serde_json::to_value(OutboundMessage::from(&message)).unwrap();

        // then (期待する結果):
        assert_eq!(value, json!({"type": "ROOM_CREATED", "roomId": "r1"}));
    }

    #[test]
    fn test_outbound_sync_state_json() {
        // テスト項目: SYNC_STATE は再生状態を payload に含む
        // given (前提条件):
        let message = ServerMessage::SyncState {
            state: PlaybackState::default(),
        };

        // when (操作):
        let value = serde_json::to_value(OutboundMessage::from(&message)).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({"type": "SYNC_STATE", "payload": {"playing": false, "time": 0, "src": ""}})
        );
    }

    #[test]
    fn test_outbound_error_json() {
        // テスト項目: ERROR はトップレベルの message と payload.message の両方を含む
        // given (前提条件):
        let message = ServerMessage::room_not_found();

        // when (操作):
        let value = serde_json::to_value(OutboundMessage::from(&message)).unwrap();

        // then (期待する結果):
        assert_eq!(
            value,
            json!({
                "type": "ERROR",
                "message": "Room not found",
                "payload": {"message": "Room not found"}
            })
        );
    }

    #[test]
    fn test_outbound_playback_json_has_no_room_id() {
        // テスト項目: 再生イベントの中継は type と payload のみ
        // given (前提条件):
        let message = ServerMessage::Playback {
            kind: PlaybackEventKind::Seek,
            state: PlaybackState::new(json!({"time": 10})),
        };

        // when (操作):
        let value = serde_json::to_value(OutboundMessage::from(&message)).unwrap();

        // then (期待する結果):
        assert_eq!(value, json!({"type": "SEEK", "payload": {"time": 10}}));
    }

    #[test]
    fn test_room_to_detail_dto() {
        // テスト項目: Room が RoomDetailDto に変換される
        // given (前提条件):
        let mut room = Room::new(room_id("r1"), Timestamp::new(1672531200000));
        room.add_member(crate::domain::ConnectionId::generate());

        // when (操作):
        let dto = RoomDetailDto::from(room);

        // then (期待する結果):
        assert_eq!(dto.id, "r1");
        assert_eq!(dto.member_count, 1);
        assert_eq!(dto.state, json!({"playing": false, "time": 0, "src": ""}));
        assert!(dto.created_at.starts_with("2023-01-01T00:00:00"));
    }
}
