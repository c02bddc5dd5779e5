//! HTTP API response DTOs.

use serde::Serialize;
use serde_json::Value;

/// Health report for `GET /api/health`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDto {
    pub status: &'static str,
    pub rooms: usize,
    pub joined_connections: usize,
}

/// Room summary for `GET /api/rooms`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryDto {
    pub id: String,
    pub member_count: usize,
    pub created_at: String,
}

/// Room detail for `GET /api/rooms/{room_id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetailDto {
    pub id: String,
    pub member_count: usize,
    pub state: Value,
    pub created_at: String,
}
