//! UseCase: Room の参照（デバッグ用 HTTP エンドポイント向け）

use std::sync::Arc;

use crate::domain::{Room, RoomError, RoomRepository, TimerCode};

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 全ての Room をコード順で返す
    pub async fn execute(&self) -> Vec<Room> {
        self.repository.get_rooms().await
    }
}

/// Room 詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self, code: &TimerCode) -> Result<Room, RoomError> {
        self.repository.get_room(code).await
    }
}
