//! エンティティ定義

use std::collections::HashSet;

use serde_json::{Value, json};

use super::{ConnectionId, RoomId, Timestamp};

/// ルームの最新の再生状態
///
/// 中身（再生中フラグ・再生位置・ソースなど）はクライアントが決める不透明な値で、
/// サーバーは保存して再配信するだけで解釈しない。
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState(Value);

impl PlaybackState {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl Default for PlaybackState {
    /// 停止中・再生位置 0・ソースなし
    fn default() -> Self {
        Self(json!({
            "playing": false,
            "time": 0,
            "src": "",
        }))
    }
}

/// 同期視聴セッション
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub members: HashSet<ConnectionId>,
    pub state: PlaybackState,
    pub created_at: Timestamp,
}

impl Room {
    /// メンバーなし・デフォルトの再生状態でルームを作成
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            members: HashSet::new(),
            state: PlaybackState::default(),
            created_at,
        }
    }

    /// メンバーを追加（既にメンバーなら false）
    pub fn add_member(&mut self, connection_id: ConnectionId) -> bool {
        self.members.insert(connection_id)
    }

    /// メンバーを削除（メンバーでなければ false）
    pub fn remove_member(&mut self, connection_id: &ConnectionId) -> bool {
        self.members.remove(connection_id)
    }

    pub fn has_member(&self, connection_id: &ConnectionId) -> bool {
        self.members.contains(connection_id)
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// メンバー集合のスナップショット
    pub fn member_ids(&self) -> Vec<ConnectionId> {
        self.members.iter().copied().collect()
    }

    /// 再生状態を丸ごと置き換える（マージはしない）
    pub fn replace_state(&mut self, state: PlaybackState) {
        self.state = state;
    }
}
