//! Error types for the timer client.

use sharetimer_server::domain::{ProtocolError, ValueObjectError};
use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client id is not usable on the wire
    #[error("Invalid client id: {0}")]
    InvalidClientId(#[from] ValueObjectError),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server closed the connection or a read/write failed
    #[error("Connection lost")]
    ConnectionLost,

    /// A REPL line could not be turned into a frame
    #[error("Unknown command '{0}' (type 'help')")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
