//! UseCase: タイマーコマンド処理（create / join / leave / start / pause / resume）
//!
//! ## 状態遷移とイベント通知
//!
//! | コマンド | 条件 | 結果 | 通知先 |
//! |---|---|---|---|
//! | create | Room なし | 送信者を owner として作成 | なし |
//! | create | Room あり、送信者が owner | owner の接続を更新 | なし |
//! | join | Room あり、送信者が owner 以外 | 参加者に追加 | owner に `join` |
//! | leave | Room あり、送信者が owner 以外 | 参加者から削除 | owner に `leave` |
//! | start / resume | 送信者が owner | running = true | 参加者全員 |
//! | pause | 送信者が owner | running = false | 参加者全員 |
//!
//! それ以外は `TimerCommandError` になり、状態は変わらずイベントも送られない。
//! 既に参加している場合の join、参加していない場合の leave は何もせず、通知もしない。

use std::sync::Arc;

use sharetimer_shared::time::Clock;

use crate::{
    domain::{
        ClientId, ConnectionId, IdentityMap, MessagePusher, Room, RoomError, RoomRepository,
        TimerAction, TimerCode, TimerCommand, TimerEvent, Timestamp,
    },
    infrastructure::dto::websocket::EventFrame,
};

use super::error::TimerCommandError;

/// タイマーコマンド処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Room を新規作成した
    Created,
    /// owner が別の接続から create し直した
    OwnerReconnected,
    /// 状態は変わらなかった（重複 join、未参加での leave）
    Unchanged,
    /// 状態が変わり、イベントを通知した
    Notified {
        event: TimerEvent,
        recipients: Vec<ClientId>,
    },
}

/// タイマーコマンド処理のユースケース
pub struct TimerCommandUseCase {
    repository: Arc<dyn RoomRepository>,
    identities: Arc<dyn IdentityMap>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl TimerCommandUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        identities: Arc<dyn IdentityMap>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            identities,
            message_pusher,
            clock,
        }
    }

    /// タイマーコマンドを実行
    ///
    /// # Arguments
    ///
    /// * `connection` - コマンドを送信した接続
    /// * `command` - 解析済みのタイマーコマンド
    ///
    /// # Errors
    ///
    /// * `TimerCommandError::IdentityNotSet` - 接続がまだクライアント ID を宣言していない
    /// * `TimerCommandError::Room` - 状態遷移の条件を満たさない（Room なし、owner でない等）
    pub async fn execute(
        &self,
        connection: ConnectionId,
        command: TimerCommand,
    ) -> Result<TimerOutcome, TimerCommandError> {
        let sender = self
            .identities
            .identity_of(&connection)
            .await
            .ok_or(TimerCommandError::IdentityNotSet(connection))?;
        let TimerCommand { action, code } = command;

        let outcome = match action {
            TimerAction::Create => self.create(connection, sender.clone(), code.clone()).await?,
            TimerAction::Join => self.join(&sender, &code).await?,
            TimerAction::Leave => self.leave(&sender, &code).await?,
            TimerAction::Start => self.set_running(&sender, &code, TimerEvent::Start).await?,
            TimerAction::Pause => self.set_running(&sender, &code, TimerEvent::Pause).await?,
            TimerAction::Resume => self.set_running(&sender, &code, TimerEvent::Resume).await?,
        };

        tracing::info!(
            "Client '{}' sent {} for timer {}: {:?}",
            sender,
            action,
            code,
            outcome
        );
        Ok(outcome)
    }

    async fn create(
        &self,
        connection: ConnectionId,
        sender: ClientId,
        code: TimerCode,
    ) -> Result<TimerOutcome, TimerCommandError> {
        let created_at = Timestamp::new(self.clock.now_millis());
        match self
            .repository
            .create_room(Room::new(code, sender.clone(), created_at))
            .await
        {
            Ok(()) => Ok(TimerOutcome::Created),
            Err(RoomError::AlreadyExists { owner, .. }) if owner == sender => {
                // owner は ID で保持しているので、接続の割り当てだけ更新する
                self.identities.bind(sender, connection).await;
                Ok(TimerOutcome::OwnerReconnected)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn join(
        &self,
        sender: &ClientId,
        code: &TimerCode,
    ) -> Result<TimerOutcome, TimerCommandError> {
        if !self.repository.add_participant(code, sender).await? {
            return Ok(TimerOutcome::Unchanged);
        }
        let owner = self.repository.get_room(code).await?.owner;
        Ok(self.notify(code, TimerEvent::Join, vec![owner]).await)
    }

    async fn leave(
        &self,
        sender: &ClientId,
        code: &TimerCode,
    ) -> Result<TimerOutcome, TimerCommandError> {
        if !self.repository.remove_participant(code, sender).await? {
            return Ok(TimerOutcome::Unchanged);
        }
        let owner = self.repository.get_room(code).await?.owner;
        Ok(self.notify(code, TimerEvent::Leave, vec![owner]).await)
    }

    async fn set_running(
        &self,
        sender: &ClientId,
        code: &TimerCode,
        event: TimerEvent,
    ) -> Result<TimerOutcome, TimerCommandError> {
        let running = !matches!(event, TimerEvent::Pause);
        let participants = self.repository.set_running(code, sender, running).await?;
        Ok(self.notify(code, event, participants).await)
    }

    async fn notify(
        &self,
        code: &TimerCode,
        event: TimerEvent,
        recipients: Vec<ClientId>,
    ) -> TimerOutcome {
        let frame = EventFrame::new(code.clone(), event).to_string();
        if let Err(e) = self
            .message_pusher
            .broadcast(recipients.clone(), &frame)
            .await
        {
            tracing::warn!("Failed to deliver '{}': {}", frame, e);
        }
        TimerOutcome::Notified { event, recipients }
    }
}
