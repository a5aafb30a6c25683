//! Domain layer: value objects, the `Room` entity, and the traits the
//! use cases depend on.

pub mod command;
pub mod connection;
pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use command::{AuthCommand, Command, TimerAction, TimerCommand, TimerEvent};
pub use connection::{Connection, ConnectionRegistry, IdentityMap, PusherChannel};
pub use entity::Room;
pub use error::{MessagePushError, ProtocolError, RoomError, ValueObjectError};
pub use message_pusher::MessagePusher;
pub use repository::RoomRepository;
pub use value_object::{ClientId, ConnectionId, TIMER_CODE_LEN, TimerCode, Timestamp};

#[cfg(test)]
pub use message_pusher::MockMessagePusher;
