//! UseCase 層
//!
//! 各ユースケースはドメイン層の trait（WidgetStateRepository, MessagePusher）にのみ依存します。

pub mod connect_client;
pub mod disconnect_client;
pub mod dispatch_command;
pub mod error;
pub mod get_health;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use connect_client::ConnectClientUseCase;
pub use disconnect_client::DisconnectClientUseCase;
pub use dispatch_command::{DispatchCommandUseCase, DispatchOutcome};
pub use error::CommandError;
pub use get_health::{GetHealthUseCase, HealthReport};

/// Serializes state changes and their fan-out across all connections.
///
/// Held while a command is applied and broadcast, and while a new overlay
/// takes its snapshot and joins the registry, so no overlay can observe
/// updates out of order or miss one between snapshot and registration.
#[derive(Debug, Clone, Default)]
pub struct RelayTurn(Arc<Mutex<()>>);

impl RelayTurn {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn acquire(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.0.lock().await
    }
}
