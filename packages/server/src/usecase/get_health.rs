//! UseCase: ヘルスチェック用の稼働状況取得

use std::sync::Arc;

use crate::domain::{ConnectionRegistry, RoomRepository};

/// 稼働状況のスナップショット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthSummary {
    /// 存在するルーム数
    pub rooms: usize,
    /// いずれかのルームに参加している接続数
    pub joined_connections: usize,
}

/// 稼働状況取得のユースケース
pub struct GetHealthUseCase {
    repository: Arc<dyn RoomRepository>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl GetHealthUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self {
            repository,
            registry,
        }
    }

    pub async fn execute(&self) -> HealthSummary {
        HealthSummary {
            rooms: self.repository.list_rooms().await.len(),
            joined_connections: self.registry.count().await,
        }
    }
}
