//! ドメイン層のエラー定義

use thiserror::Error;

/// 値オブジェクトのバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("RoomId must not be empty")]
    RoomIdEmpty,

    #[error("RoomId is too long (max {max} characters, got {actual})")]
    RoomIdTooLong { max: usize, actual: usize },
}

/// Repository 操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),

    #[error("Outbound queue of connection '{0}' is full")]
    QueueFull(String),

    #[error("Failed to encode message: {0}")]
    EncodeFailed(String),
}
