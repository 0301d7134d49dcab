//! Utilities shared between the onair relay server and the terminal client.

pub mod logger;
pub mod time;
