//! UseCase: 接続受付処理
//!
//! 新しい接続に `ConnectionId` を採番し、ConnectionRegistry に登録します。
//! クライアント ID はこの時点では未定で、後から `auth:setid` で宣言されます。

use std::sync::Arc;

use sharetimer_shared::time::Clock;

use crate::domain::{ConnectionId, ConnectionRegistry, PusherChannel, Timestamp};

/// 接続受付のユースケース
pub struct ConnectClientUseCase {
    connections: Arc<dyn ConnectionRegistry>,
    clock: Arc<dyn Clock>,
}

impl ConnectClientUseCase {
    pub fn new(connections: Arc<dyn ConnectionRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { connections, clock }
    }

    /// 接続を登録し、採番した `ConnectionId` を返す
    ///
    /// # Arguments
    ///
    /// * `sender` - クライアントへのメッセージ送信用チャンネル
    pub async fn execute(&self, sender: PusherChannel) -> ConnectionId {
        let connection = ConnectionId::generate();
        let connected_at = Timestamp::new(self.clock.now_millis());
        self.connections
            .register(connection, sender, connected_at)
            .await;
        connection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::registry::InMemoryConnectionRegistry;
    use sharetimer_shared::time::FixedClock;
    use tokio::sync::mpsc;

    #[tokio::test]
    async fn test_connect_registers_live_connection() {
        // テスト項目: 接続すると生存中の接続として登録される
        // given (前提条件):
        let connections = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = ConnectClientUseCase::new(connections.clone(), Arc::new(FixedClock::new(42)));
        let (tx, _rx) = mpsc::unbounded_channel();

        // when (操作):
        let connection = usecase.execute(tx).await;

        // then (期待する結果):
        assert!(connections.is_live(&connection).await);
        assert_eq!(connections.count().await, 1);
    }

    #[tokio::test]
    async fn test_each_connection_gets_its_own_id() {
        // テスト項目: 接続ごとに異なる ConnectionId が採番される
        // given (前提条件):
        let connections = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = ConnectClientUseCase::new(connections.clone(), Arc::new(FixedClock::new(42)));
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        // when (操作):
        let first = usecase.execute(tx1).await;
        let second = usecase.execute(tx2).await;

        // then (期待する結果):
        assert_ne!(first, second);
        assert_eq!(connections.count().await, 2);
    }
}
