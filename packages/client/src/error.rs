//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The relay rejected the admin token
    #[error("The relay rejected the admin token")]
    Unauthorized,

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
