//! Entity 定義
//!
//! `Room` は共有タイマー 1 つ分のセッション状態を持ち、状態遷移のルールを自身で守る。

use std::collections::BTreeSet;

use serde::Serialize;

use super::{ClientId, RoomError, TimerCode, Timestamp};

/// 共有タイマーのセッション
///
/// ## 不変条件
///
/// - `owner` は `participants` に含まれない
/// - `running` を変更できるのは `owner` のみ
///
/// owner は接続ではなく ClientId で保持するため、owner が再接続しても Room は維持される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    pub code: TimerCode,
    pub owner: ClientId,
    pub running: bool,
    pub participants: BTreeSet<ClientId>,
    pub created_at: Timestamp,
}

impl Room {
    pub fn new(code: TimerCode, owner: ClientId, created_at: Timestamp) -> Self {
        Self {
            code,
            owner,
            running: false,
            participants: BTreeSet::new(),
            created_at,
        }
    }

    pub fn is_owner(&self, client_id: &ClientId) -> bool {
        &self.owner == client_id
    }

    pub fn is_participant(&self, client_id: &ClientId) -> bool {
        self.participants.contains(client_id)
    }

    /// 参加者を追加する
    ///
    /// 新たに追加された場合は `Ok(true)`、既に参加済みなら `Ok(false)`。
    pub fn join(&mut self, client_id: &ClientId) -> Result<bool, RoomError> {
        self.ensure_not_owner(client_id)?;
        Ok(self.participants.insert(client_id.clone()))
    }

    /// 参加者を削除する
    ///
    /// 実際に削除された場合は `Ok(true)`、参加していなければ `Ok(false)`。
    pub fn leave(&mut self, client_id: &ClientId) -> Result<bool, RoomError> {
        self.ensure_not_owner(client_id)?;
        Ok(self.participants.remove(client_id))
    }

    /// 実行状態を変更する（owner のみ）
    pub fn set_running(&mut self, by: &ClientId, running: bool) -> Result<(), RoomError> {
        if !self.is_owner(by) {
            return Err(RoomError::NotOwner {
                code: self.code.clone(),
                client_id: by.clone(),
            });
        }
        self.running = running;
        Ok(())
    }

    fn ensure_not_owner(&self, client_id: &ClientId) -> Result<(), RoomError> {
        if self.is_owner(client_id) {
            return Err(RoomError::OwnerIsNotParticipant {
                code: self.code.clone(),
                client_id: client_id.clone(),
            });
        }
        Ok(())
    }
}
