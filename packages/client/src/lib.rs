//! Terminal client for the onair relay.
//!
//! Watches overlay events or sends controller commands from a prompt.

mod command;
mod domain;
mod error;
mod formatter;
mod prompt;
mod runner;
mod session;
mod ui;

pub use error::ClientError;
pub use runner::run_client;
pub use session::Role;
