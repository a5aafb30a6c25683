//! UseCase: クライアント ID の宣言（`auth:setid`）
//!
//! 接続ごとに一度だけ有効です。既に ID を宣言した接続からの再宣言は無視されます（上書きしない）。
//! 同じ ID が別の接続に割り当て済みの場合は、新しい接続に置き換えます（再接続・タブ再読み込み）。

use std::sync::Arc;

use crate::domain::{ClientId, ConnectionId, IdentityMap};

use super::error::SetIdentityError;

/// クライアント ID 宣言のユースケース
pub struct SetIdentityUseCase {
    identities: Arc<dyn IdentityMap>,
}

impl SetIdentityUseCase {
    pub fn new(identities: Arc<dyn IdentityMap>) -> Self {
        Self { identities }
    }

    /// クライアント ID を接続に割り当てる
    ///
    /// # Returns
    ///
    /// * `Ok(Some(ConnectionId))` - 以前この ID を持っていた接続（置き換えた場合）
    /// * `Ok(None)` - 新規の割り当て
    /// * `Err(SetIdentityError::AlreadySet)` - この接続は既に ID を宣言済み
    pub async fn execute(
        &self,
        connection: ConnectionId,
        client_id: ClientId,
    ) -> Result<Option<ConnectionId>, SetIdentityError> {
        if let Some(current) = self.identities.identity_of(&connection).await {
            return Err(SetIdentityError::AlreadySet {
                connection,
                current,
            });
        }

        let replaced = self.identities.bind(client_id.clone(), connection).await;
        tracing::info!("Connection {} is now client '{}'", connection, client_id);
        Ok(replaced)
    }
}
