//! UseCase: チャットの中継
//!
//! チャットは送信者を含む全メンバーに届けます。全員のチャットログの順序を揃えるため、
//! クライアントは自分の入力をローカルで描画する場合に重複を除く必要があります。

use std::sync::Arc;

use serde_json::Value;

use crate::domain::{ConnectionId, MessagePusher, RoomId, RoomRepository, ServerMessage};

use super::error::RelayError;

/// チャット中継のユースケース
pub struct RelayChatUseCase {
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayChatUseCase {
    /// 新しい RelayChatUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// チャットの中継を実行
    ///
    /// 再生状態は変更しない。
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<ConnectionId>)` - ブロードキャスト対象（送信者を含む全メンバー）
    /// * `Err(RelayError::NotAMember)` - 送信者がルームのメンバーではない
    pub async fn execute(
        &self,
        sender: &ConnectionId,
        room_id: &RoomId,
        payload: Value,
    ) -> Result<Vec<ConnectionId>, RelayError> {
        let members = self.repository.member_ids(room_id).await;
        if !members.contains(sender) {
            return Err(RelayError::NotAMember(room_id.to_string()));
        }

        let message = ServerMessage::Chat { payload };
        self.message_pusher
            .broadcast(members.clone(), &message)
            .await;

        Ok(members)
    }
}
