//! コマンドディスパッチャ
//!
//! 受信したテキストフレームを解析し、エリアごとのユースケースへ振り分けます。
//! エリアごとのユースケースはそれぞれのコマンド型しか受け取らないため、
//! 別エリアのコマンドが誤って渡されることは型で防がれています。

use std::sync::Arc;

use crate::{
    domain::{AuthCommand, Command, ConnectionId},
    infrastructure::dto::websocket::CommandFrame,
};

use super::{
    error::DispatchError,
    set_identity::SetIdentityUseCase,
    timer_command::{TimerCommandUseCase, TimerOutcome},
};

/// ディスパッチの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    IdentitySet,
    Timer(TimerOutcome),
}

pub struct CommandDispatcher {
    set_identity_usecase: Arc<SetIdentityUseCase>,
    timer_command_usecase: Arc<TimerCommandUseCase>,
}

impl CommandDispatcher {
    pub fn new(
        set_identity_usecase: Arc<SetIdentityUseCase>,
        timer_command_usecase: Arc<TimerCommandUseCase>,
    ) -> Self {
        Self {
            set_identity_usecase,
            timer_command_usecase,
        }
    }

    /// テキストフレームを 1 つ処理する
    ///
    /// エラーは呼び出し側でログに残すだけで、接続は閉じない。
    pub async fn dispatch(
        &self,
        connection: ConnectionId,
        text: &str,
    ) -> Result<DispatchOutcome, DispatchError> {
        let frame: CommandFrame = text.parse()?;
        match Command::try_from(frame)? {
            Command::Auth(AuthCommand::SetId(client_id)) => {
                self.set_identity_usecase
                    .execute(connection, client_id)
                    .await?;
                Ok(DispatchOutcome::IdentitySet)
            }
            Command::Timer(command) => {
                let outcome = self
                    .timer_command_usecase
                    .execute(connection, command)
                    .await?;
                Ok(DispatchOutcome::Timer(outcome))
            }
        }
    }
}
