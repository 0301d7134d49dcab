//! Shared application state.

use std::sync::Arc;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, DispatchCommandUseCase, GetHealthUseCase,
};

/// Shared application state
pub struct AppState {
    pub connect_client_usecase: Arc<ConnectClientUseCase>,
    pub disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    pub dispatch_command_usecase: Arc<DispatchCommandUseCase>,
    pub get_health_usecase: Arc<GetHealthUseCase>,
}
