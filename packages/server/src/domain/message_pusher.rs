//! MessagePusher trait 定義
//!
//! クライアントへのイベント送信を抽象化します。送信は best-effort で、
//! 接続が割り当てられていないクライアント宛てのイベントは破棄されます（キューイング・再送なし）。

use async_trait::async_trait;

use super::{ClientId, MessagePushError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 特定のクライアントにメッセージを送信
    async fn push_to(&self, client_id: &ClientId, content: &str) -> Result<(), MessagePushError>;

    /// 複数のクライアントにメッセージを送信
    ///
    /// 一部のクライアントに届かなくても失敗として扱わない。
    async fn broadcast(
        &self,
        targets: Vec<ClientId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
