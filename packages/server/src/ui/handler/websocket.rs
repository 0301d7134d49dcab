//! WebSocket connection handlers.

use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{
        ConnectInfo, State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{domain::Partition, ui::state::AppState};

/// Fallback for every path other than `/health`.
///
/// WebSocket upgrades on any path are accepted and classified by their request
/// target; plain HTTP requests get an empty 404.
pub async fn websocket_or_not_found(
    State(state): State<Arc<AppState>>,
    ConnectInfo(remote_addr): ConnectInfo<SocketAddr>,
    uri: Uri,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    let ws = match ws {
        Ok(ws) => ws,
        Err(_) => return StatusCode::NOT_FOUND.into_response(),
    };

    let request_target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path());
    let partition = Partition::classify(request_target);
    tracing::debug!(
        "Upgrade request for '{}' from {} classified as {}",
        request_target,
        remote_addr,
        partition
    );

    ws.on_upgrade(move |socket| handle_socket(socket, state, partition, remote_addr))
}

/// Spawns a task that forwards queued frames from `rx` to the WebSocket sink.
///
/// When every sender for `rx` is gone (the connection was unregistered or the
/// registry was drained), a close frame is sent and the task ends.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                return;
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    partition: Partition,
    remote_addr: SocketAddr,
) {
    let (sender, mut receiver) = socket.split();

    // Register before reading anything; overlays get their snapshot queued here
    let (tx, rx) = mpsc::unbounded_channel();
    let connection_id = state.connect_client_usecase.execute(partition, tx).await;
    tracing::info!(
        "{} '{}' connected from {}",
        partition,
        connection_id,
        remote_addr
    );

    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text from '{}': {}", connection_id, text.as_str());
                    state_clone
                        .dispatch_command_usecase
                        .execute(connection_id, partition, text.as_str())
                        .await;
                }
                Message::Binary(data) => {
                    tracing::debug!(
                        "Ignoring {} byte binary frame from '{}'",
                        data.len(),
                        connection_id
                    );
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("'{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .disconnect_client_usecase
        .execute(partition, &connection_id)
        .await;
    tracing::info!(
        "{} '{}' from {} disconnected",
        partition,
        connection_id,
        remote_addr
    );
}
