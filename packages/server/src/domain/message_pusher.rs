//! MessagePusher trait 定義
//!
//! 接続中のクライアントへメッセージを届けるためのインターフェース。
//! WebSocket 固有の処理は Infrastructure 層に閉じ込めます。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, Partition};

/// Outbound channel of one connection. Dropping every clone closes the connection.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Connection registry plus delivery.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Add a connection to a partition
    async fn register_client(
        &self,
        partition: Partition,
        connection_id: ConnectionId,
        sender: PusherChannel,
    );

    /// Remove a connection; no-op if absent
    async fn unregister_client(&self, partition: Partition, connection_id: &ConnectionId);

    /// Deliver to a single connection in either partition
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Deliver to every open connection of a partition; returns how many were reached
    async fn broadcast(&self, partition: Partition, content: &str) -> usize;

    /// Current number of connections in a partition
    async fn count(&self, partition: Partition) -> usize;

    /// Drop every connection; returns how many were closed
    async fn close_all(&self) -> usize;
}
