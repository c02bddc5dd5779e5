//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::RepositoryError;

/// ルーム作成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateRoomError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// ルーム参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    #[error("Room '{0}' not found")]
    RoomNotFound(String),
}

/// 再生イベント・チャットの中継エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelayError {
    /// 送信者が指定ルームのメンバーではない（存在しないルームを含む）
    #[error("Connection is not a member of room '{0}'")]
    NotAMember(String),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room not found")]
    RoomNotFound,
}
