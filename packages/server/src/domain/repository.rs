//! Repository / Registry trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, PlaybackState, RepositoryError, Room, RoomId, Timestamp};

/// メンバー削除の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRemoval {
    /// ルームは残っている（残りのメンバー数）
    Remaining(usize),
    /// 最後のメンバーが抜けたためルームを削除した
    RoomDeleted,
}

/// Room Directory: ルーム ID からルームへのマップ
///
/// ## 不変条件
///
/// ルームはメンバーが 1 人以上いる間だけ存在する。
/// `ensure_room` で遅延作成され、`remove_member` で最後のメンバーが抜けた時点で削除される。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを取得し、なければ作成する（冪等）
    ///
    /// 既存のルームのメンバーと再生状態は破棄しない。
    async fn ensure_room(&self, room_id: &RoomId, created_at: Timestamp) -> Room;

    /// ルームを取得（作成はしない）
    async fn get_room(&self, room_id: &RoomId) -> Option<Room>;

    /// メンバーを追加
    async fn add_member(
        &self,
        room_id: &RoomId,
        connection_id: ConnectionId,
    ) -> Result<(), RepositoryError>;

    /// メンバーを削除し、空になったルームは削除する
    async fn remove_member(
        &self,
        room_id: &RoomId,
        connection_id: &ConnectionId,
    ) -> Result<MemberRemoval, RepositoryError>;

    /// 再生状態を丸ごと置き換える（ルームがなければ何もしない）
    async fn set_state(&self, room_id: &RoomId, state: PlaybackState);

    /// メンバー集合のスナップショット（ルームがなければ空）
    async fn member_ids(&self, room_id: &RoomId) -> Vec<ConnectionId>;

    /// 全ルームのスナップショット（ID 順）
    async fn list_rooms(&self) -> Vec<Room>;
}

/// Connection Registry: 接続ごとの現在のルーム
///
/// スカラーの関連付けのみを保持する。ルームのメンバー集合との整合は呼び出し側が保つ。
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 接続をルームに関連付ける（以前の関連付けは上書き）
    async fn set_room(&self, connection_id: &ConnectionId, room_id: RoomId);

    /// 接続の現在のルーム
    async fn get_room(&self, connection_id: &ConnectionId) -> Option<RoomId>;

    /// 関連付けを解除
    async fn clear(&self, connection_id: &ConnectionId);

    /// ルームに関連付けられている接続数
    async fn count(&self) -> usize;
}
