//! WebSocket message DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message type on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    CreateRoom,
    JoinRoom,
    Play,
    Pause,
    Seek,
    SetVideo,
    Chat,
    RoomCreated,
    SyncState,
    Error,
}

/// Inbound message from a client.
///
/// `type` stays a plain string so an unknown event kind can be told apart
/// from a payload that is not JSON at all.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub r#type: String,
    #[serde(rename = "roomId", default)]
    pub room_id: Option<String>,
    #[serde(default)]
    pub payload: Option<Value>,
}

/// Outbound message to a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundMessage {
    pub r#type: MessageType,
    #[serde(rename = "roomId", skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
