//! UseCase 層のエラー定義
//!
//! どのエラーもクライアントには返されない（プロトコルに否定応答はない）。UI 層でログに残すだけ。

use thiserror::Error;

use crate::domain::{ClientId, ConnectionId, ProtocolError, RoomError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetIdentityError {
    #[error("connection {connection} already declared client id '{current}'")]
    AlreadySet {
        connection: ConnectionId,
        current: ClientId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimerCommandError {
    #[error("connection {0} has not declared a client id")]
    IdentityNotSet(ConnectionId),

    #[error(transparent)]
    Room(#[from] RoomError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("connection {0} is already closed")]
    AlreadyClosed(ConnectionId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("malformed frame: {0}")]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    SetIdentity(#[from] SetIdentityError),

    #[error(transparent)]
    TimerCommand(#[from] TimerCommandError),
}
