//! InMemory ConnectionRegistry 実装
//!
//! 生存中の接続を `ConnectionId` で管理します。接続を削除すると送信チャンネルが drop され、
//! 書き込みタスクが終了して WebSocket が閉じられます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{Connection, ConnectionId, ConnectionRegistry, PusherChannel, Timestamp};

#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    connections: Mutex<HashMap<ConnectionId, Connection>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, id: ConnectionId, channel: PusherChannel, connected_at: Timestamp) {
        let mut connections = self.connections.lock().await;
        connections.insert(
            id,
            Connection {
                id,
                channel,
                connected_at,
                live: true,
            },
        );
        tracing::info!(
            "Connection {} registered. Total connections: {}",
            id,
            connections.len()
        );
    }

    async fn begin_close(&self, id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        match connections.get_mut(id) {
            Some(connection) if connection.live => {
                connection.live = false;
                true
            }
            _ => false,
        }
    }

    async fn unregister(&self, id: &ConnectionId) -> bool {
        let mut connections = self.connections.lock().await;
        let removed = connections.remove(id).is_some();
        if removed {
            tracing::info!(
                "Connection {} unregistered. Total connections: {}",
                id,
                connections.len()
            );
        }
        removed
    }

    async fn channel(&self, id: &ConnectionId) -> Option<PusherChannel> {
        let connections = self.connections.lock().await;
        connections
            .get(id)
            .filter(|connection| connection.live)
            .map(|connection| connection.channel.clone())
    }

    async fn is_live(&self, id: &ConnectionId) -> bool {
        let connections = self.connections.lock().await;
        connections.get(id).is_some_and(|connection| connection.live)
    }

    async fn count(&self) -> usize {
        let connections = self.connections.lock().await;
        connections.values().filter(|connection| connection.live).count()
    }
}
