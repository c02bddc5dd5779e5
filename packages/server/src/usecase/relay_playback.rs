//! UseCase: 再生イベント（PLAY / PAUSE / SEEK / SET_VIDEO）の中継
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayPlaybackUseCase::execute() メソッド
//! - 再生状態の丸ごと置き換えと、送信者以外へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 送信者のプレイヤーは既に自分の操作を反映しているため、送信者に返すとエコーになる
//!
//! ### どのような状況を想定しているか
//! - 正常系：3 人のルームで 1 人が PLAY
//! - 異常系：メンバーでないルームへの送信（何も起きない）

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, PlaybackEventKind, PlaybackState, RoomId, RoomRepository,
    ServerMessage,
};

use super::error::RelayError;

/// 再生イベント中継のユースケース
pub struct RelayPlaybackUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayPlaybackUseCase {
    /// 新しい RelayPlaybackUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 再生イベントの中継を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - ブロードキャスト対象（送信者以外のメンバー）
    /// * `Err(RelayError::NotAMember)` - 送信者がルームのメンバーではない
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
        kind: PlaybackEventKind,
        state: PlaybackState,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        // 1. 送信者がメンバーであることを確認
        let members = self.repository.member_ids(room_id).await;
        if !members.contains(sender) {
            return Err(RelayError::NotAMember(room_id.to_string()));
        }

        // 2. 再生状態を丸ごと置き換え
        self.repository.set_state(room_id, state.clone()).await;

        // 3. 送信者以外にブロードキャスト
        let targets: Vec<ConnectionId> = members.into_iter().filter(|id| id != sender).collect();
        let message = ServerMessage::Playback { kind, state };
        self.message_pusher
            .broadcast(targets.clone(), &message)
            .await;

        Ok(targets)
    }
}
