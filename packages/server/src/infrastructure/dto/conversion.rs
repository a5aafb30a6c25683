//! DTO とドメインモデルの変換
//!
//! ワイヤー上の `CommandFrame` をエリアごとの閉じた列挙型 `Command` に変換します。
//! 未知のコマンドや引数の誤りはここで `ProtocolError` になります。

use sharetimer_shared::time::millis_to_rfc3339;

use crate::domain::{
    AuthCommand, ClientId, Command, ProtocolError, Room, TimerAction, TimerCode, TimerCommand,
};

use super::{
    http::RoomSummaryDto,
    websocket::{Area, CommandFrame},
};

const SET_ID_COMMAND: &str = "setid";

impl TryFrom<CommandFrame> for Command {
    type Error = ProtocolError;

    fn try_from(frame: CommandFrame) -> Result<Self, Self::Error> {
        match frame.area {
            Area::Auth => auth_command(frame).map(Command::Auth),
            Area::Timer => timer_command(frame).map(Command::Timer),
        }
    }
}

fn auth_command(frame: CommandFrame) -> Result<AuthCommand, ProtocolError> {
    if frame.command != SET_ID_COMMAND {
        return Err(ProtocolError::UnknownCommand {
            area: Area::Auth.as_str().to_string(),
            command: frame.command,
        });
    }
    let actual = frame.args.len();
    let [client_id]: [String; 1] =
        frame
            .args
            .try_into()
            .map_err(|_| ProtocolError::WrongArgumentCount {
                command: SET_ID_COMMAND.to_string(),
                expected: 1,
                actual,
            })?;
    Ok(AuthCommand::SetId(ClientId::new(client_id)?))
}

fn timer_command(frame: CommandFrame) -> Result<TimerCommand, ProtocolError> {
    let action =
        TimerAction::from_name(&frame.command).ok_or_else(|| ProtocolError::UnknownCommand {
            area: Area::Timer.as_str().to_string(),
            command: frame.command.clone(),
        })?;
    // 2 番目以降の引数は現在のコマンドでは使わない
    let code = frame
        .args
        .first()
        .ok_or_else(|| ProtocolError::WrongArgumentCount {
            command: frame.command.clone(),
            expected: 1,
            actual: 0,
        })?;
    Ok(TimerCommand {
        action,
        code: TimerCode::new(code)?,
    })
}

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            code: room.code.to_string(),
            owner: room.owner.to_string(),
            running: room.running,
            participants: room.participants.iter().map(|p| p.to_string()).collect(),
            created_at: millis_to_rfc3339(room.created_at.value()),
        }
    }
}
