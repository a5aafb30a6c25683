//! UseCase layer.
//!
//! Each use case owns one operation of the real-time core and depends only on
//! the domain traits, never on concrete infrastructure.

pub mod connect_client;
pub mod dispatcher;
pub mod disconnect_client;
pub mod error;
pub mod get_rooms;
pub mod set_identity;
pub mod timer_command;

pub use connect_client::ConnectClientUseCase;
pub use dispatcher::{CommandDispatcher, DispatchOutcome};
pub use disconnect_client::DisconnectClientUseCase;
pub use error::{DisconnectError, DispatchError, SetIdentityError, TimerCommandError};
pub use get_rooms::{GetRoomDetailUseCase, GetRoomsUseCase};
pub use set_identity::SetIdentityUseCase;
pub use timer_command::{TimerCommandUseCase, TimerOutcome};
