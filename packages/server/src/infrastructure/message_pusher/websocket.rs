//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` をパーティション別に管理
//! - クライアントへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された sender を受け取り、メッセージ送信に使用します。
//! sender を手放すと UI 層の送信ループが終了し、接続が閉じられます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, ConnectionRegistry, MessagePushError, MessagePusher, Partition, PusherChannel,
};

/// WebSocket を使った MessagePusher 実装
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender（overlays / controllers）
    registry: Arc<Mutex<ConnectionRegistry<PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(registry: Arc<Mutex<ConnectionRegistry<PusherChannel>>>) -> Self {
        Self { registry }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(ConnectionRegistry::new())))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(
        &self,
        partition: Partition,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) {
        let mut registry = self.registry.lock().await;
        registry.add(partition, connection_id, sender);
        tracing::debug!("{} '{}' registered to MessagePusher", partition, connection_id);
    }

    async fn unregister_client(&self, partition: Partition, connection_id: &ConnectionId) {
        let mut registry = self.registry.lock().await;
        if registry.remove(partition, connection_id).is_some() {
            tracing::debug!(
                "{} '{}' unregistered from MessagePusher",
                partition,
                connection_id
            );
        }
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let registry = self.registry.lock().await;

        let sender = registry
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ConnectionNotFound(connection_id.to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to '{}'", connection_id);
        Ok(())
    }

    async fn broadcast(&self, partition: Partition, content: &str) -> usize {
        // 送信前に対象を確定させ、ロックを保持したまま送信しない
        let targets: Vec<(ConnectionId, PusherChannel)> = {
            let registry = self.registry.lock().await;
            registry
                .iter(partition)
                .map(|(id, sender)| (*id, sender.clone()))
                .collect()
        };

        let mut delivered = 0;
        for (id, sender) in targets {
            // 閉じかけの接続はスキップする（キューにも積まない）
            if sender.is_closed() {
                tracing::debug!("Skipping closed {} '{}'", partition, id);
                continue;
            }
            match sender.send(content.to_string()) {
                Ok(()) => delivered += 1,
                Err(e) => tracing::warn!("Failed to push message to '{}': {}", id, e),
            }
        }

        tracing::debug!(
            "Broadcasted message to {} {} connection(s)",
            delivered,
            partition
        );
        delivered
    }

    async fn count(&self, partition: Partition) -> usize {
        self.registry.lock().await.size_of(partition)
    }

    async fn close_all(&self) -> usize {
        let closed = self.registry.lock().await.clear();
        tracing::info!("Closed {} connection(s)", closed);
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定の接続への送信（どちらのパーティションでも）
    // - broadcast: パーティション内の開いている接続への送信
    // - close_all: 全接続の sender を手放す
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功・失敗
    // 2. broadcast がパーティションをまたがない
    // 3. broadcast が閉じた接続をスキップし、残りには届く
    // ========================================

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続にメッセージを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = ConnectionId::generate();
        pusher.register_client(Partition::Controllers, id, tx).await;

        // when (操作):
        let result = pusher.push_to(&id, "Hello").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx.recv().await, Some("Hello".to_string()));
    }

    #[tokio::test]
    async fn test_push_to_connection_not_found() {
        // テスト項目: 存在しない接続への送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let id = ConnectionId::generate();

        // when (操作):
        let result = pusher.push_to(&id, "Hello").await;

        // then (期待する結果):
        assert!(matches!(
            result,
            Err(MessagePushError::ConnectionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_push_to_closed_connection_fails() {
        // テスト項目: 受信側が閉じた接続への送信は PushFailed になる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx, rx) = mpsc::unbounded_channel();
        let id = ConnectionId::generate();
        pusher.register_client(Partition::Overlays, id, tx).await;
        drop(rx);

        // when (操作):
        let result = pusher.push_to(&id, "Hello").await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::PushFailed(_))));
    }

    #[tokio::test]
    async fn test_broadcast_reaches_only_target_partition() {
        // テスト項目: ブロードキャストは指定したパーティションにのみ届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (overlay_tx1, mut overlay_rx1) = mpsc::unbounded_channel();
        let (overlay_tx2, mut overlay_rx2) = mpsc::unbounded_channel();
        let (controller_tx, mut controller_rx) = mpsc::unbounded_channel();
        pusher
            .register_client(Partition::Overlays, ConnectionId::generate(), overlay_tx1)
            .await;
        pusher
            .register_client(Partition::Overlays, ConnectionId::generate(), overlay_tx2)
            .await;
        pusher
            .register_client(Partition::Controllers, ConnectionId::generate(), controller_tx)
            .await;

        // when (操作):
        let delivered = pusher.broadcast(Partition::Overlays, "update").await;

        // then (期待する結果):
        assert_eq!(delivered, 2);
        assert_eq!(overlay_rx1.recv().await, Some("update".to_string()));
        assert_eq!(overlay_rx2.recv().await, Some("update".to_string()));
        assert!(controller_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_broadcast_skips_closed_connections() {
        // テスト項目: 閉じた接続が含まれていてもエラーにならず、残りには届く
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (open_tx, mut open_rx) = mpsc::unbounded_channel();
        let (closed_tx, closed_rx) = mpsc::unbounded_channel::<String>();
        pusher
            .register_client(Partition::Overlays, ConnectionId::generate(), closed_tx)
            .await;
        pusher
            .register_client(Partition::Overlays, ConnectionId::generate(), open_tx)
            .await;
        drop(closed_rx);

        // when (操作):
        let delivered = pusher.broadcast(Partition::Overlays, "update").await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(open_rx.recv().await, Some("update".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_empty_partition() {
        // テスト項目: 接続が無いパーティションへのブロードキャストは 0 件
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();

        // when (操作):
        let delivered = pusher.broadcast(Partition::Overlays, "update").await;

        // then (期待する結果):
        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn test_count_and_close_all() {
        // テスト項目: count が登録数を返し、close_all で全ての sender が手放される
        // given (前提条件):
        let pusher = WebSocketMessagePusher::default();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let overlay = ConnectionId::generate();
        pusher.register_client(Partition::Overlays, overlay, tx1).await;
        pusher
            .register_client(Partition::Controllers, ConnectionId::generate(), tx2)
            .await;
        assert_eq!(pusher.count(Partition::Overlays).await, 1);
        assert_eq!(pusher.count(Partition::Controllers).await, 1);

        // when (操作):
        let closed = pusher.close_all().await;

        // then (期待する結果):
        assert_eq!(closed, 2);
        assert_eq!(pusher.count(Partition::Overlays).await, 0);
        assert_eq!(rx1.recv().await, None);
        assert_eq!(rx2.recv().await, None);

        // 既に削除済みの接続の登録解除は何もしない
        pusher.unregister_client(Partition::Overlays, &overlay).await;
        assert_eq!(pusher.count(Partition::Overlays).await, 0);
    }
}
