//! Repository trait 定義
//!
//! ドメイン層が必要とする Room テーブルへのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは 1 回の呼び出しの中で Room の状態遷移を完結させるため、
//! 同じ Room に対する並行コマンドが中途半端な状態を観測することはありません。

use async_trait::async_trait;

use super::{ClientId, Room, RoomError, TimerCode};

/// Room Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Room を新規作成する
    ///
    /// 同じコードの Room が既に存在する場合は `RoomError::AlreadyExists` を返し、既存の Room は変更しない。
    async fn create_room(&self, room: Room) -> Result<(), RoomError>;

    /// Room のスナップショットを取得
    async fn get_room(&self, code: &TimerCode) -> Result<Room, RoomError>;

    /// 全ての Room のスナップショットを取得（コード順）
    async fn get_rooms(&self) -> Vec<Room>;

    /// 参加者を追加（新規追加なら `true`）
    async fn add_participant(
        &self,
        code: &TimerCode,
        client_id: &ClientId,
    ) -> Result<bool, RoomError>;

    /// 参加者を削除（実際に削除したなら `true`）
    async fn remove_participant(
        &self,
        code: &TimerCode,
        client_id: &ClientId,
    ) -> Result<bool, RoomError>;

    /// 実行状態を変更（owner のみ）
    ///
    /// 変更と同じロックの中で読んだ参加者一覧を返す
    async fn set_running(
        &self,
        code: &TimerCode,
        by: &ClientId,
        running: bool,
    ) -> Result<Vec<ClientId>, RoomError>;

    /// 全ての Room から参加者を削除し、削除が発生した Room の (コード, owner) を返す
    async fn remove_participant_everywhere(&self, client_id: &ClientId)
    -> Vec<(TimerCode, ClientId)>;

    /// タイマーが存在するか
    async fn timer_exists(&self, code: &TimerCode) -> bool;

    /// 指定したクライアントがタイマーの owner か
    async fn is_owner(&self, code: &TimerCode, client_id: &ClientId) -> bool;
}
