//! MessagePusher trait 定義
//!
//! 接続へのメッセージ配信（トランスポート層の deliver 機能）を抽象化します。
//! 具体的な実装は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, ServerMessage};

/// 接続ごとの送信キューの上限
///
/// 上限に達した接続への配信は捨てられる。
pub const PUSHER_CHANNEL_CAPACITY: usize = 64;

/// 接続ごとの送信チャンネル（シリアライズ済みのテキストフレーム）
pub type PusherChannel = mpsc::Sender<String>;

/// 上限付きの送信チャンネルを作成
pub fn pusher_channel() -> (PusherChannel, mpsc::Receiver<String>) {
    mpsc::channel(PUSHER_CHANNEL_CAPACITY)
}

/// メッセージ配信のインターフェース
///
/// 配信は fire-and-forget。書き込めない接続やキューが埋まった接続への配信はスキップされ、再送はしない。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを登録解除
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// 特定の接続にメッセージを送信
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        message: &ServerMessage,
    ) -> Result<(), MessagePushError>;

    /// 複数の接続にメッセージを送信し、配信できた数を返す
    ///
    /// 一部の接続への配信失敗は許容する。
    async fn broadcast(&self, targets: Vec<ConnectionId>, message: &ServerMessage) -> usize;
}
