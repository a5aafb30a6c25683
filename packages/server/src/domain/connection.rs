//! 接続とクライアント ID の管理に関する trait 定義
//!
//! ## 責務の分離
//!
//! - `ConnectionRegistry`: 物理的な接続（`ConnectionId`）の生存管理。意味的な識別子は持たない
//! - `IdentityMap`: クライアントが宣言した `ClientId` と、現在有効な接続の対応付け
//!
//! Room の owner と参加者は `ClientId` で保持されるため、接続が入れ替わっても維持されます。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ClientId, ConnectionId, Timestamp};

/// 接続ごとの送信チャンネル
///
/// 受信側は接続ごとに 1 つの書き込みタスクが所有する。チャンネルを drop するとそのタスクが終了し、
/// WebSocket が閉じられる。
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// 生存中の接続
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: ConnectionId,
    pub channel: PusherChannel,
    pub connected_at: Timestamp,
    /// 切断処理が始まると `false` になる
    pub live: bool,
}

#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// 接続を登録
    async fn register(&self, id: ConnectionId, channel: PusherChannel, connected_at: Timestamp);

    /// 切断処理を開始する
    ///
    /// 生存中の接続に対する最初の呼び出しだけが `true` を返す。切断時の後始末を 1 回に限定するために使う。
    async fn begin_close(&self, id: &ConnectionId) -> bool;

    /// 接続を削除し、送信チャンネルを閉じる（冪等）
    async fn unregister(&self, id: &ConnectionId) -> bool;

    /// 生存中の接続の送信チャンネルを取得
    async fn channel(&self, id: &ConnectionId) -> Option<PusherChannel>;

    async fn is_live(&self, id: &ConnectionId) -> bool;

    /// 生存中の接続数
    async fn count(&self) -> usize;
}

#[async_trait]
pub trait IdentityMap: Send + Sync {
    /// `client_id` を `connection` に割り当てる
    ///
    /// 別の接続に割り当て済みだった場合は置き換え（再接続・タブ再読み込み）、以前の接続を返す。
    /// 以前の接続は閉じない。
    async fn bind(&self, client_id: ClientId, connection: ConnectionId) -> Option<ConnectionId>;

    /// 現在 `client_id` に割り当てられている接続
    async fn resolve(&self, client_id: &ClientId) -> Option<ConnectionId>;

    /// `connection` が宣言したクライアント ID
    async fn identity_of(&self, connection: &ConnectionId) -> Option<ClientId>;

    /// 割り当てを解除する
    ///
    /// `client_id` がまだ `connection` に割り当てられている場合のみ解除し `true` を返す。
    /// 新しい接続に引き継がれていた場合は、その割り当てを残す。
    async fn unbind(&self, client_id: &ClientId, connection: &ConnectionId) -> bool;
}
