//! UseCase: クライアント接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectClientUseCase::execute() メソッド
//! - 接続の登録と、オーバーレイへの初回スナップショット送信
//!
//! ### どのような状況を想定しているか
//! - 正常系：オーバーレイ接続（STATE_SYNC が最初に届く）
//! - 正常系：コントローラー接続（何も送られない）

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, MessagePusher, Partition, PusherChannel, WidgetStateRepository},
    infrastructure::dto::websocket::OutboundMessage,
};

use super::RelayTurn;

/// クライアント接続のユースケース
pub struct ConnectClientUseCase {
    /// Repository（ウィジェット状態ストアの抽象化）
    repository: Arc<dyn WidgetStateRepository>,
    /// MessagePusher（接続管理とメッセージ送信の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    turn: RelayTurn,
}

impl ConnectClientUseCase {
    pub fn new(
        repository: Arc<dyn WidgetStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        turn: RelayTurn,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            turn,
        }
    }

    /// 接続を登録する
    ///
    /// Overlays get a `STATE_SYNC` with the full document queued on their
    /// channel before they join the registry, so it is always their first frame.
    ///
    /// # Returns
    ///
    /// 新しく割り当てた ConnectionId
    pub async fn execute(&self, partition: Partition, sender: PusherChannel) -> ConnectionId {
        let connection_id = ConnectionId::generate();
        let _turn = self.turn.acquire().await;

        if partition == Partition::Overlays {
            let snapshot = OutboundMessage::StateSync {
                payload: self.repository.get_state().await,
            };
            match snapshot.to_json() {
                Ok(json) => {
                    if sender.send(json).is_err() {
                        tracing::warn!("Overlay '{}' went away before its snapshot", connection_id);
                    }
                }
                Err(e) => tracing::error!("Failed to serialize state snapshot: {}", e),
            }
        }

        self.message_pusher
            .register_client(partition, connection_id, sender)
            .await;

        connection_id
    }
}
