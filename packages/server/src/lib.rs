//! Broadcast state relay for onair.
//!
//! Overlay clients receive widget state; controller clients mutate it with a
//! shared admin token. State lives in memory for the life of the process.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
