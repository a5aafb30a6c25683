//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - ClientId を IdentityMap で接続に解決し、ConnectionRegistry から送信チャンネルを取得する
//! - クライアントへのイベント送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! 送信チャンネルの受信側は接続ごとの書き込みタスク（`ui::handler::websocket`）が 1 つだけ所有します。
//! 複数のタスクから同じ接続へ同時に送信しても、フレームは書き込みタスクで直列化されます。

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{ClientId, ConnectionRegistry, IdentityMap, MessagePushError, MessagePusher};

pub struct WebSocketMessagePusher {
    connections: Arc<dyn ConnectionRegistry>,
    identities: Arc<dyn IdentityMap>,
}

impl WebSocketMessagePusher {
    pub fn new(
        connections: Arc<dyn ConnectionRegistry>,
        identities: Arc<dyn IdentityMap>,
    ) -> Self {
        Self {
            connections,
            identities,
        }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn push_to(&self, client_id: &ClientId, content: &str) -> Result<(), MessagePushError> {
        let connection = self
            .identities
            .resolve(client_id)
            .await
            .ok_or_else(|| MessagePushError::ClientNotFound(client_id.to_string()))?;
        let sender = self
            .connections
            .channel(&connection)
            .await
            .ok_or_else(|| MessagePushError::ClientNotFound(client_id.to_string()))?;

        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to client '{}'", content, client_id);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ClientId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        for target in targets {
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = self.push_to(&target, content).await {
                tracing::debug!("Skipping client '{}' during broadcast: {}", target, e);
            }
        }
        Ok(())
    }
}
