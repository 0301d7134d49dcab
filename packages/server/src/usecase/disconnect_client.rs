//! UseCase: クライアント切断処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Partition};

/// クライアント切断のユースケース
pub struct DisconnectClientUseCase {
    /// MessagePusher（接続管理とメッセージ送信の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectClientUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// 接続をレジストリから外す（存在しなければ何もしない）
    pub async fn execute(&self, partition: Partition, connection_id: &ConnectionId) {
        self.message_pusher
            .unregister_client(partition, connection_id)
            .await;
    }

    /// 全ての接続を閉じる（シャットダウン時）
    ///
    /// # Returns
    ///
    /// 閉じた接続数
    pub async fn disconnect_all(&self) -> usize {
        self.message_pusher.close_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockMessagePusher;
    use mockall::predicate::eq;

    #[tokio::test]
    async fn test_execute_unregisters_from_partition() {
        // テスト項目: 切断時に該当パーティションから登録解除される
        // given (前提条件):
        let id = ConnectionId::generate();
        let mut pusher = MockMessagePusher::new();
        pusher
            .expect_unregister_client()
            .with(eq(Partition::Controllers), eq(id))
            .times(1)
            .return_const(());
        let usecase = DisconnectClientUseCase::new(Arc::new(pusher));

        // when (操作):
        usecase.execute(Partition::Controllers, &id).await;

        // then (期待する結果):
        // MockMessagePusher の expectation が drop 時に検証される
    }

    #[tokio::test]
    async fn test_disconnect_all_closes_every_connection() {
        // テスト項目: シャットダウン時に全接続が閉じられ、その件数が返る
        // given (前提条件):
        let mut pusher = MockMessagePusher::new();
        pusher.expect_close_all().times(1).return_const(3usize);
        let usecase = DisconnectClientUseCase::new(Arc::new(pusher));

        // when (操作):
        let closed = usecase.disconnect_all().await;

        // then (期待する結果):
        assert_eq!(closed, 3);
    }
}
