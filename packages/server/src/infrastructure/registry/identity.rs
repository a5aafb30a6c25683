//! InMemory IdentityMap 実装
//!
//! `ClientId -> ConnectionId`（現在有効な割り当て）と
//! `ConnectionId -> ClientId`（その接続が宣言した ID）の 2 方向を 1 つの Mutex で保護します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ClientId, ConnectionId, IdentityMap};

#[derive(Default)]
struct Bindings {
    by_client: HashMap<ClientId, ConnectionId>,
    by_connection: HashMap<ConnectionId, ClientId>,
}

#[derive(Default)]
pub struct InMemoryIdentityMap {
    bindings: Mutex<Bindings>,
}

impl InMemoryIdentityMap {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityMap for InMemoryIdentityMap {
    async fn bind(&self, client_id: ClientId, connection: ConnectionId) -> Option<ConnectionId> {
        let mut bindings = self.bindings.lock().await;
        bindings.by_connection.insert(connection, client_id.clone());
        let previous = bindings.by_client.insert(client_id.clone(), connection);
        match previous {
            Some(previous) if previous != connection => {
                tracing::info!(
                    "Client '{}' moved from connection {} to {}",
                    client_id,
                    previous,
                    connection
                );
                Some(previous)
            }
            _ => None,
        }
    }

    async fn resolve(&self, client_id: &ClientId) -> Option<ConnectionId> {
        let bindings = self.bindings.lock().await;
        bindings.by_client.get(client_id).copied()
    }

    async fn identity_of(&self, connection: &ConnectionId) -> Option<ClientId> {
        let bindings = self.bindings.lock().await;
        bindings.by_connection.get(connection).cloned()
    }

    async fn unbind(&self, client_id: &ClientId, connection: &ConnectionId) -> bool {
        let mut bindings = self.bindings.lock().await;
        bindings.by_connection.remove(connection);
        if bindings.by_client.get(client_id) == Some(connection) {
            bindings.by_client.remove(client_id);
            true
        } else {
            false
        }
    }
}
