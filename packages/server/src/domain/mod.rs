//! Domain layer: widget state, connections, access control and the traits
//! the outer layers implement.

pub mod access;
pub mod command;
pub mod connection;
pub mod error;
pub mod message_pusher;
pub mod repository;
pub mod widget;

pub use access::{Access, AccessGate, AdminToken};
pub use command::{CommandType, UnknownCommandType};
pub use connection::{ConnectionId, ConnectionRegistry, Partition};
pub use error::MessagePushError;
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::WidgetStateRepository;
pub use widget::{InvalidPatch, WidgetKind, WidgetPatch, WidgetRecord, WidgetState};
