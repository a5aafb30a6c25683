//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! タイマーコードをキーとする HashMap をテーブル全体で 1 つの Mutex で保護します。
//!
//! Room の状態はプロセスの生存期間だけ保持され、再起動で失われます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientId, Room, RoomError, RoomRepository, TimerCode};

/// インメモリ Room Repository 実装
#[derive(Default)]
pub struct InMemoryRoomRepository {
    rooms: Mutex<HashMap<TimerCode, Room>>,
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(&self, room: Room) -> Result<(), RoomError> {
        let mut rooms = self.rooms.lock().await;
        if let Some(existing) = rooms.get(&room.code) {
            return Err(RoomError::AlreadyExists {
                code: existing.code.clone(),
                owner: existing.owner.clone(),
            });
        }
        rooms.insert(room.code.clone(), room);
        Ok(())
    }

    async fn get_room(&self, code: &TimerCode) -> Result<Room, RoomError> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(code)
            .cloned()
            .ok_or_else(|| RoomError::NotFound(code.clone()))
    }

    async fn get_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut snapshot: Vec<Room> = rooms.values().cloned().collect();
        snapshot.sort_by(|a, b| a.code.cmp(&b.code));
        snapshot
    }

    async fn add_participant(
        &self,
        code: &TimerCode,
        client_id: &ClientId,
    ) -> Result<bool, RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(code)
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;
        room.join(client_id)
    }

    async fn remove_participant(
        &self,
        code: &TimerCode,
        client_id: &ClientId,
    ) -> Result<bool, RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(code)
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;
        room.leave(client_id)
    }

    async fn set_running(
        &self,
        code: &TimerCode,
        by: &ClientId,
        running: bool,
    ) -> Result<Vec<ClientId>, RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(code)
            .ok_or_else(|| RoomError::NotFound(code.clone()))?;
        room.set_running(by, running)?;
        Ok(room.participants.iter().cloned().collect())
    }

    async fn remove_participant_everywhere(
        &self,
        client_id: &ClientId,
    ) -> Vec<(TimerCode, ClientId)> {
        let mut rooms = self.rooms.lock().await;
        let mut left: Vec<(TimerCode, ClientId)> = rooms
            .values_mut()
            .filter_map(|room| {
                room.participants
                    .remove(client_id)
                    .then(|| (room.code.clone(), room.owner.clone()))
            })
            .collect();
        left.sort();
        left
    }

    async fn timer_exists(&self, code: &TimerCode) -> bool {
        let rooms = self.rooms.lock().await;
        rooms.contains_key(code)
    }

    async fn is_owner(&self, code: &TimerCode, client_id: &ClientId) -> bool {
        let rooms = self.rooms.lock().await;
        rooms
            .get(code)
            .is_some_and(|room| room.is_owner(client_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRepository の作成・参加・退出・実行状態の変更
    // - 切断時に全ての Room から参加者を取り除く処理
    //
    // 【なぜこのテストが必要か】
    // - Room テーブルは UseCase から並行にアクセスされる共有状態
    // - 既存の Room が他のクライアントに上書きされないことを保証する必要がある
    // ========================================

    fn client(id: &str) -> ClientId {
        ClientId::new(id.to_string()).unwrap()
    }

    fn code(value: &str) -> TimerCode {
        TimerCode::new(value).unwrap()
    }

    async fn create_test_repository_with_room(owner: &str) -> InMemoryRoomRepository {
        let repo = InMemoryRoomRepository::new();
        repo.create_room(Room::new(code("ABCDEF"), client(owner), Timestamp::new(0)))
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_create_room_rejects_existing_code() {
        // テスト項目: 既存のコードで作成しても既存の Room は変更されない
        // given (前提条件):
        let repo = create_test_repository_with_room("alice").await;
        repo.set_running(&code("ABCDEF"), &client("alice"), true)
            .await
            .unwrap();

        // when (操作):
        let result = repo
            .create_room(Room::new(code("ABCDEF"), client("mallory"), Timestamp::new(0)))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RoomError::AlreadyExists {
                code: code("ABCDEF"),
                owner: client("alice"),
            })
        );
        let room = repo.get_room(&code("ABCDEF")).await.unwrap();
        assert_eq!(room.owner, client("alice"));
        assert!(room.running);
    }

    #[tokio::test]
    async fn test_add_participant_to_missing_room() {
        // テスト項目: 存在しない Room への参加は NotFound になる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        let result = repo.add_participant(&code("ZZZZZZ"), &client("bob")).await;

        // then (期待する結果):
        assert_eq!(result, Err(RoomError::NotFound(code("ZZZZZZ"))));
    }

    #[tokio::test]
    async fn test_concurrent_joins_keep_single_entry() {
        // テスト項目: 同じクライアントの並行 join で新規追加と判定されるのは 1 回だけ
        // given (前提条件):
        let repo = std::sync::Arc::new(create_test_repository_with_room("alice").await);

        // when (操作):
        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.add_participant(&code("ABCDEF"), &client("bob")).await
            }));
        }
        let mut newly_added = 0;
        for handle in handles {
            if handle.await.unwrap() == Ok(true) {
                newly_added += 1;
            }
        }

        // then (期待する結果):
        assert_eq!(newly_added, 1);
        let room = repo.get_room(&code("ABCDEF")).await.unwrap();
        assert_eq!(room.participants.len(), 1);
    }

    #[tokio::test]
    async fn test_remove_participant_everywhere_reports_owners() {
        // テスト項目: 参加していた全ての Room から削除され、各 Room の owner が返される
        // given (前提条件):
        let repo = create_test_repository_with_room("alice").await;
        repo.create_room(Room::new(code("GHIJKL"), client("carol"), Timestamp::new(0)))
            .await
            .unwrap();
        repo.create_room(Room::new(code("MNOPQR"), client("dave"), Timestamp::new(0)))
            .await
            .unwrap();
        repo.add_participant(&code("ABCDEF"), &client("bob"))
            .await
            .unwrap();
        repo.add_participant(&code("GHIJKL"), &client("bob"))
            .await
            .unwrap();

        // when (操作):
        let left = repo.remove_participant_everywhere(&client("bob")).await;

        // then (期待する結果):
        assert_eq!(
            left,
            vec![
                (code("ABCDEF"), client("alice")),
                (code("GHIJKL"), client("carol")),
            ]
        );
        for room in repo.get_rooms().await {
            assert!(!room.is_participant(&client("bob")));
        }
    }

    #[tokio::test]
    async fn test_set_running_returns_participants_seen_under_lock() {
        // テスト項目: 実行状態の変更時点の参加者一覧が返り、後から参加した人は含まれない
        // given (前提条件):
        let repo = create_test_repository_with_room("alice").await;
        repo.add_participant(&code("ABCDEF"), &client("bob"))
            .await
            .unwrap();

        // when (操作):
        let recipients = repo
            .set_running(&code("ABCDEF"), &client("alice"), true)
            .await
            .unwrap();
        repo.add_participant(&code("ABCDEF"), &client("carol"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(recipients, vec![client("bob")]);
        let rejected = repo
            .set_running(&code("ABCDEF"), &client("bob"), false)
            .await;
        assert!(matches!(rejected, Err(RoomError::NotOwner { .. })));
    }

    #[tokio::test]
    async fn test_timer_exists_and_is_owner() {
        // テスト項目: 永続化層の契約（存在確認と owner 確認）に答えられる
        // given (前提条件):
        let repo = create_test_repository_with_room("alice").await;

        // when (操作):
        let exists = repo.timer_exists(&code("abcdef")).await;
        let missing = repo.timer_exists(&code("QQQQQQ")).await;
        let alice_owns = repo.is_owner(&code("ABCDEF"), &client("alice")).await;
        let bob_owns = repo.is_owner(&code("ABCDEF"), &client("bob")).await;

        // then (期待する結果):
        assert!(exists);
        assert!(!missing);
        assert!(alice_owns);
        assert!(!bob_owns);
    }
}
