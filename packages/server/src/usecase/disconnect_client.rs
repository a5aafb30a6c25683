//! UseCase: 切断処理
//!
//! 切断時の後始末を次の順で行います。
//!
//! 1. クライアント ID の割り当てを解除
//! 2. その ID を参加者とする全ての Room から削除し、各 Room の owner に `leave` を通知
//! 3. ConnectionRegistry から削除（送信チャンネルが閉じられ、WebSocket も閉じる）
//!
//! 後始末は接続ごとに 1 回だけ実行されます。
//! ID が既に新しい接続に引き継がれていた場合（再接続）、1 と 2 は行いません。
//! owner が切断しても Room は削除されず、同じ ID で再接続して create し直すまで owner 不在になります。

use std::sync::Arc;

use crate::{
    domain::{
        ConnectionId, ConnectionRegistry, IdentityMap, MessagePusher, RoomRepository, TimerCode,
        TimerEvent,
    },
    infrastructure::dto::websocket::EventFrame,
};

use super::error::DisconnectError;

/// 切断処理のユースケース
pub struct DisconnectClientUseCase {
    connections: Arc<dyn ConnectionRegistry>,
    identities: Arc<dyn IdentityMap>,
    repository: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(
        connections: Arc<dyn ConnectionRegistry>,
        identities: Arc<dyn IdentityMap>,
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            connections,
            identities,
            repository,
            message_pusher,
        }
    }

    /// 切断処理を実行
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<TimerCode>)` - 参加者から外れた Room のコード
    /// * `Err(DisconnectError::AlreadyClosed)` - 既に後始末済み（または未登録）の接続
    pub async fn execute(
        &self,
        connection: ConnectionId,
    ) -> Result<Vec<TimerCode>, DisconnectError> {
        if !self.connections.begin_close(&connection).await {
            return Err(DisconnectError::AlreadyClosed(connection));
        }

        let mut left_rooms = Vec::new();
        if let Some(client_id) = self.identities.identity_of(&connection).await {
            if self.identities.unbind(&client_id, &connection).await {
                for (code, owner) in self
                    .repository
                    .remove_participant_everywhere(&client_id)
                    .await
                {
                    let frame = EventFrame::new(code.clone(), TimerEvent::Leave).to_string();
                    if let Err(e) = self.message_pusher.push_to(&owner, &frame).await {
                        tracing::debug!("Owner '{}' missed '{}': {}", owner, frame, e);
                    }
                    left_rooms.push(code);
                }
            } else {
                tracing::info!(
                    "Client '{}' already moved to another connection, keeping its rooms",
                    client_id
                );
            }
        }

        self.connections.unregister(&connection).await;
        Ok(left_rooms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ClientId, PusherChannel, Room, Timestamp},
        infrastructure::{
            message_pusher::WebSocketMessagePusher,
            registry::{InMemoryConnectionRegistry, InMemoryIdentityMap},
            repository::InMemoryRoomRepository,
        },
    };
    use tokio::sync::mpsc;

    struct Fixture {
        usecase: DisconnectClientUseCase,
        repository: Arc<InMemoryRoomRepository>,
        connections: Arc<InMemoryConnectionRegistry>,
        identities: Arc<InMemoryIdentityMap>,
    }

    fn create_fixture() -> Fixture {
        let repository = Arc::new(InMemoryRoomRepository::new());
        let connections = Arc::new(InMemoryConnectionRegistry::new());
        let identities = Arc::new(InMemoryIdentityMap::new());
        let pusher = Arc::new(WebSocketMessagePusher::new(
            connections.clone(),
            identities.clone(),
        ));
        let usecase = DisconnectClientUseCase::new(
            connections.clone(),
            identities.clone(),
            repository.clone(),
            pusher,
        );
        Fixture {
            usecase,
            repository,
            connections,
            identities,
        }
    }

    fn client(id: &str) -> ClientId {
        ClientId::new(id.to_string()).unwrap()
    }

    fn code(value: &str) -> TimerCode {
        TimerCode::new(value).unwrap()
    }

    async fn connect(
        fixture: &Fixture,
        id: Option<&str>,
    ) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let connection = ConnectionId::generate();
        let (tx, rx): (PusherChannel, _) = mpsc::unbounded_channel();
        fixture
            .connections
            .register(connection, tx, Timestamp::new(0))
            .await;
        if let Some(id) = id {
            fixture.identities.bind(client(id), connection).await;
        }
        (connection, rx)
    }

    async fn create_room(fixture: &Fixture, value: &str, owner: &str) {
        fixture
            .repository
            .create_room(Room::new(code(value), client(owner), Timestamp::new(0)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_disconnect_participant_notifies_each_owner() {
        // テスト項目: 参加者が切断すると、参加していた全ての Room の owner に leave が届く
        // given (前提条件):
        let fixture = create_fixture();
        let (_alice, mut alice_rx) = connect(&fixture, Some("alice")).await;
        let (_carol, mut carol_rx) = connect(&fixture, Some("carol")).await;
        let (bob, _bob_rx) = connect(&fixture, Some("bob")).await;
        create_room(&fixture, "ABCDEF", "alice").await;
        create_room(&fixture, "GHIJKL", "carol").await;
        for value in ["ABCDEF", "GHIJKL"] {
            fixture
                .repository
                .add_participant(&code(value), &client("bob"))
                .await
                .unwrap();
        }

        // when (操作):
        let result = fixture.usecase.execute(bob).await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![code("ABCDEF"), code("GHIJKL")]));
        assert_eq!(
            alice_rx.recv().await,
            Some("1:event:timer:ABCDEF:leave".to_string())
        );
        assert_eq!(
            carol_rx.recv().await,
            Some("1:event:timer:GHIJKL:leave".to_string())
        );
        assert_eq!(fixture.identities.resolve(&client("bob")).await, None);
        assert!(!fixture.connections.is_live(&bob).await);
    }

    #[tokio::test]
    async fn test_disconnect_runs_only_once() {
        // テスト項目: 同じ接続の切断処理は 1 回だけ実行される
        // given (前提条件):
        let fixture = create_fixture();
        let (_alice, mut alice_rx) = connect(&fixture, Some("alice")).await;
        let (bob, _bob_rx) = connect(&fixture, Some("bob")).await;
        create_room(&fixture, "ABCDEF", "alice").await;
        fixture
            .repository
            .add_participant(&code("ABCDEF"), &client("bob"))
            .await
            .unwrap();

        // when (操作):
        let first = fixture.usecase.execute(bob).await;
        let second = fixture.usecase.execute(bob).await;

        // then (期待する結果):
        assert!(first.is_ok());
        assert_eq!(second, Err(DisconnectError::AlreadyClosed(bob)));
        assert_eq!(
            alice_rx.recv().await,
            Some("1:event:timer:ABCDEF:leave".to_string())
        );
        assert!(alice_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_disconnect_owner_keeps_room() {
        // テスト項目: owner が切断しても Room は残り、owner も変わらない
        // given (前提条件):
        let fixture = create_fixture();
        let (alice, _alice_rx) = connect(&fixture, Some("alice")).await;
        create_room(&fixture, "ABCDEF", "alice").await;

        // when (操作):
        let result = fixture.usecase.execute(alice).await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![]));
        let room = fixture.repository.get_room(&code("ABCDEF")).await.unwrap();
        assert_eq!(room.owner, client("alice"));
        assert_eq!(fixture.identities.resolve(&client("alice")).await, None);
    }

    #[tokio::test]
    async fn test_disconnect_before_setting_identity() {
        // テスト項目: ID を宣言する前に切断しても後始末できる
        // given (前提条件):
        let fixture = create_fixture();
        let (anonymous, mut rx) = connect(&fixture, None).await;

        // when (操作):
        let result = fixture.usecase.execute(anonymous).await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![]));
        assert_eq!(fixture.connections.count().await, 0);
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_disconnect_stale_connection_keeps_memberships() {
        // テスト項目: 再接続済みの古い接続が切断されても、参加状態と新しい割り当ては残る
        // given (前提条件):
        let fixture = create_fixture();
        let (_alice, mut alice_rx) = connect(&fixture, Some("alice")).await;
        let (bob_old, _old_rx) = connect(&fixture, Some("bob")).await;
        create_room(&fixture, "ABCDEF", "alice").await;
        fixture
            .repository
            .add_participant(&code("ABCDEF"), &client("bob"))
            .await
            .unwrap();
        let (bob_new, _new_rx) = connect(&fixture, Some("bob")).await;

        // when (操作):
        let result = fixture.usecase.execute(bob_old).await;

        // then (期待する結果):
        assert_eq!(result, Ok(vec![]));
        let room = fixture.repository.get_room(&code("ABCDEF")).await.unwrap();
        assert!(room.is_participant(&client("bob")));
        assert_eq!(
            fixture.identities.resolve(&client("bob")).await,
            Some(bob_new)
        );
        assert!(alice_rx.try_recv().is_err());
    }
}
