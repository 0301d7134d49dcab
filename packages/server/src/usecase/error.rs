//! UseCase 層のエラー定義

use thiserror::Error;

/// A command could not be applied.
///
/// The `Display` text is sent verbatim as the `message` of an `ERROR` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Invalid JSON")]
    InvalidJson,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Unknown message type")]
    UnknownType,

    #[error("Invalid payload")]
    InvalidPayload,
}
