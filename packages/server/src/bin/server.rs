//! onair broadcast state relay.
//!
//! Overlays connect on any path without `control` in it and receive widget
//! state; controllers connect on a path containing `control` and send
//! commands carrying the admin token.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin onair-server
//! ADMIN_TOKEN=secret PORT=3000 cargo run --bin onair-server
//! ```

use std::sync::Arc;

use clap::Parser;
use onair_server::{
    config::{ServerArgs, ServerConfig, TokenSource},
    domain::AccessGate,
    infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemoryWidgetStateRepository,
    },
    ui::Server,
    usecase::{
        ConnectClientUseCase, DisconnectClientUseCase, DispatchCommandUseCase, GetHealthUseCase,
        RelayTurn,
    },
};
use onair_shared::{logger::setup_logger, time::SystemClock};

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let config = match ServerConfig::from_args(ServerArgs::parse()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.token_source == TokenSource::Generated {
        println!("Admin token: {}", config.admin_token.as_str());
        tracing::warn!("ADMIN_TOKEN not set; generated a token for this run (printed above)");
    }

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases
    // 4. Server

    // 1. Create Repository (in-memory widget state)
    let repository = Arc::new(InMemoryWidgetStateRepository::default());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::default());

    // 3. Create UseCases
    let clock = Arc::new(SystemClock);
    let turn = RelayTurn::new();
    let connect_client_usecase = Arc::new(ConnectClientUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        turn.clone(),
    ));
    let disconnect_client_usecase = Arc::new(DisconnectClientUseCase::new(message_pusher.clone()));
    let dispatch_command_usecase = Arc::new(DispatchCommandUseCase::new(
        repository.clone(),
        message_pusher.clone(),
        AccessGate::new(config.admin_token.clone()),
        clock.clone(),
        turn,
    ));
    let get_health_usecase = Arc::new(GetHealthUseCase::new(message_pusher.clone(), clock));

    // 4. Create and run the server
    let server = Server::new(
        connect_client_usecase,
        disconnect_client_usecase,
        dispatch_command_usecase,
        get_health_usecase,
    );
    if let Err(e) = server.run(&config.bind_addr()).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
