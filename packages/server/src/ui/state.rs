//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    CommandDispatcher, ConnectClientUseCase, DisconnectClientUseCase, GetRoomDetailUseCase,
    GetRoomsUseCase,
};

/// Shared application state
pub struct AppState {
    /// ConnectClientUseCase（接続受付のユースケース）
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    /// DisconnectClientUseCase（切断処理のユースケース）
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    /// CommandDispatcher（受信フレームの振り分け）
    pub dispatcher: Arc<CommandDispatcher>,
    /// GetRoomsUseCase（Room 一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（Room 詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
