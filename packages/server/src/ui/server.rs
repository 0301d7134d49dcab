//! Server execution logic.

use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{
    ConnectClientUseCase, DisconnectClientUseCase, DispatchCommandUseCase, GetHealthUseCase,
};

use super::{
    handler::{health_check, websocket_or_not_found},
    signal::shutdown_signal,
    state::AppState,
};

/// Broadcast relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(connect, disconnect, dispatch, health);
/// server.run("0.0.0.0".to_string(), 8080).await?;
/// ```
pub struct Server {
    connect_client_usecase: Arc<ConnectClientUseCase>,
    disconnect_client_usecase: Arc<DisconnectClientUseCase>,
    dispatch_command_usecase: Arc<DispatchCommandUseCase>,
    get_health_usecase: Arc<GetHealthUseCase>,
}

impl Server {
    pub fn new(
        connect_client_usecase: Arc<ConnectClientUseCase>,
        disconnect_client_usecase: Arc<DisconnectClientUseCase>,
        dispatch_command_usecase: Arc<DispatchCommandUseCase>,
        get_health_usecase: Arc<GetHealthUseCase>,
    ) -> Self {
        Self {
            connect_client_usecase,
            disconnect_client_usecase,
            dispatch_command_usecase,
            get_health_usecase,
        }
    }

    /// Build the router: `GET /health`, and WebSocket upgrades on every other path.
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            connect_client_usecase: self.connect_client_usecase.clone(),
            disconnect_client_usecase: self.disconnect_client_usecase.clone(),
            dispatch_command_usecase: self.dispatch_command_usecase.clone(),
            get_health_usecase: self.get_health_usecase.clone(),
        });

        Router::new()
            .route("/health", get(health_check))
            .fallback(websocket_or_not_found)
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the relay until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
        let listener = TcpListener::bind(bind_addr).await?;

        tracing::info!("onair relay listening on {}", listener.local_addr()?);
        tracing::info!("Overlays connect to: ws://{}/overlay", bind_addr);
        tracing::info!("Controllers connect to: ws://{}/control", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    ///
    /// Shutdown closes every WebSocket connection first, then stops accepting.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let disconnect_client_usecase = self.disconnect_client_usecase.clone();
        let app = self.router();

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown.await;
            let closed = disconnect_client_usecase.disconnect_all().await;
            tracing::info!("Closed {} connection(s), no longer accepting", closed);
        })
        .await
    }
}
