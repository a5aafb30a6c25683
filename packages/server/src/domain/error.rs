//! ドメイン層のエラー定義

use thiserror::Error;

use super::{ClientId, TimerCode};

/// Value Object の生成エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("client id must not be empty")]
    EmptyClientId,

    #[error("client id '{0}' contains a reserved character")]
    InvalidClientId(String),

    #[error("timer code '{0}' must be exactly 6 characters")]
    InvalidTimerCode(String),
}

/// ワイヤープロトコルの解析エラー
///
/// どのエラーも接続を閉じず、フレームを破棄してログに残すだけ。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("expected at least {expected} fields, got {actual}")]
    TooFewFields { expected: usize, actual: usize },

    #[error("version '{0}' is not a number")]
    InvalidVersion(String),

    #[error("unsupported version {0}")]
    UnsupportedVersion(u32),

    #[error("unsupported message type '{0}'")]
    UnsupportedMessageType(String),

    #[error("unknown area '{0}'")]
    UnknownArea(String),

    #[error("unknown command '{command}' in area '{area}'")]
    UnknownCommand { area: String, command: String },

    #[error("command '{command}' takes {expected} argument(s), got {actual}")]
    WrongArgumentCount {
        command: String,
        expected: usize,
        actual: usize,
    },

    #[error("invalid event '{0}'")]
    UnknownEvent(String),

    #[error(transparent)]
    InvalidArgument(#[from] ValueObjectError),
}

/// Room の状態遷移エラー
///
/// いずれもプロトコル上は黙って無視される（サーバー側でログのみ）。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("timer {0} does not exist")]
    NotFound(TimerCode),

    #[error("timer {code} already exists (owner '{owner}')")]
    AlreadyExists { code: TimerCode, owner: ClientId },

    #[error("'{client_id}' is not the owner of timer {code}")]
    NotOwner { code: TimerCode, client_id: ClientId },

    #[error("owner '{client_id}' cannot join or leave its own timer {code}")]
    OwnerIsNotParticipant { code: TimerCode, client_id: ClientId },
}

/// メッセージ送信エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("client '{0}' has no live connection")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
