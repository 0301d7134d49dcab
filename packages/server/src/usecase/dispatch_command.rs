//! UseCase: コマンド処理（Command Dispatcher）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DispatchCommandUseCase::execute() メソッド
//! - 受信した JSON 封筒の解釈、認可、状態更新、ブロードキャスト、送信者への返信
//!
//! ### なぜこのテストが必要か
//! - 不正なコマンドで状態が壊れないこと、未認可の更新が届かないことを保証する
//! - 更新がオーバーレイにのみ届くことを確認する
//!
//! ### どのような状況を想定しているか
//! - 正常系：各 UPDATE_* / TRIGGER_POPUP / GET_STATE / PING
//! - 異常系：不正な JSON、未知のコマンド、トークン誤り、オブジェクト以外の payload

use std::sync::Arc;

use onair_shared::time::Clock;
use serde_json::Value;

use crate::{
    domain::{
        Access, AccessGate, CommandType, ConnectionId, MessagePusher, Partition, WidgetKind,
        WidgetPatch, WidgetStateRepository,
    },
    infrastructure::dto::websocket::{CommandEnvelope, OutboundMessage},
};

use super::{CommandError, RelayTurn};

/// What a single inbound frame produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchOutcome {
    /// Frame sent back to the sender
    pub reply: OutboundMessage,
    /// Overlay connections the fan-out reached
    pub broadcast_count: usize,
}

/// Effect of a successfully applied command.
struct Applied {
    reply: OutboundMessage,
    broadcast: Option<OutboundMessage>,
}

impl Applied {
    fn reply_only(reply: OutboundMessage) -> Self {
        Self {
            reply,
            broadcast: None,
        }
    }
}

/// コマンド処理のユースケース
pub struct DispatchCommandUseCase {
    /// Repository（ウィジェット状態ストアの抽象化）
    repository: Arc<dyn WidgetStateRepository>,
    /// MessagePusher（接続管理とメッセージ送信の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    gate: AccessGate,
    clock: Arc<dyn Clock>,
    turn: RelayTurn,
}

impl DispatchCommandUseCase {
    pub fn new(
        repository: Arc<dyn WidgetStateRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        gate: AccessGate,
        clock: Arc<dyn Clock>,
        turn: RelayTurn,
    ) -> Self {
        Self {
            repository,
            message_pusher,
            gate,
            clock,
            turn,
        }
    }

    /// 受信したテキストフレームを処理する
    ///
    /// Applies the command, fans the resulting event out to every overlay,
    /// then replies to the sender. Failures never close the connection; they
    /// become an `ERROR` reply with no mutation and no broadcast.
    ///
    /// # Arguments
    ///
    /// * `sender` - 送信元の接続 ID
    /// * `partition` - 送信元のパーティション
    /// * `text` - 受信したテキスト
    pub async fn execute(
        &self,
        sender: ConnectionId,
        partition: Partition,
        text: &str,
    ) -> DispatchOutcome {
        let _turn = self.turn.acquire().await;

        let applied = match self.apply(partition, text).await {
            Ok(applied) => applied,
            Err(e) => {
                tracing::warn!("Rejected frame from {} '{}': {}", partition, sender, e);
                Applied::reply_only(OutboundMessage::error(e.to_string()))
            }
        };

        let broadcast_count = match &applied.broadcast {
            Some(event) => self.fan_out(event).await,
            None => 0,
        };
        self.reply(&sender, &applied.reply).await;

        DispatchOutcome {
            reply: applied.reply,
            broadcast_count,
        }
    }

    async fn apply(&self, partition: Partition, text: &str) -> Result<Applied, CommandError> {
        let envelope = CommandEnvelope::parse(text).map_err(|_| CommandError::InvalidJson)?;
        let type_name = envelope.r#type.as_deref();

        if self
            .gate
            .authorize(partition, type_name, envelope.token.as_deref())
            == Access::Denied
        {
            return Err(CommandError::Unauthorized);
        }

        let command = type_name
            .ok_or(CommandError::UnknownType)?
            .parse::<CommandType>()
            .map_err(|_| CommandError::UnknownType)?;
        tracing::info!("Dispatching {} from {}", command.as_str(), partition);

        match command {
            CommandType::Ping => Ok(Applied::reply_only(OutboundMessage::Pong {
                timestamp: self.clock.now_millis(),
            })),
            CommandType::UpdateTicker => self.update(WidgetKind::Ticker, envelope.payload).await,
            CommandType::UpdatePopup => self.update(WidgetKind::Popup, envelope.payload).await,
            CommandType::UpdateBrb => self.update(WidgetKind::Brb, envelope.payload).await,
            CommandType::UpdateCountdown => {
                self.update(WidgetKind::Countdown, envelope.payload).await
            }
            CommandType::UpdateStats => self.update(WidgetKind::Stats, envelope.payload).await,
            CommandType::TriggerPopup => Ok(Applied {
                reply: OutboundMessage::Ack {
                    widget: WidgetKind::Popup,
                },
                broadcast: Some(OutboundMessage::PopupTrigger {
                    payload: envelope.payload.unwrap_or(Value::Null),
                }),
            }),
            CommandType::GetState => Ok(Applied::reply_only(OutboundMessage::StateSync {
                payload: self.repository.get_state().await,
            })),
        }
    }

    async fn update(
        &self,
        kind: WidgetKind,
        payload: Option<Value>,
    ) -> Result<Applied, CommandError> {
        let patch = WidgetPatch::from_payload(payload).map_err(|_| CommandError::InvalidPayload)?;
        let merged = self.repository.merge(kind, patch).await;

        Ok(Applied {
            reply: OutboundMessage::Ack { widget: kind },
            broadcast: Some(OutboundMessage::widget_update(kind, merged)),
        })
    }

    /// Serialize once, deliver to every open overlay.
    async fn fan_out(&self, event: &OutboundMessage) -> usize {
        match event.to_json() {
            Ok(json) => self.message_pusher.broadcast(Partition::Overlays, &json).await,
            Err(e) => {
                tracing::error!("Failed to serialize broadcast event: {}", e);
                0
            }
        }
    }

    async fn reply(&self, sender: &ConnectionId, reply: &OutboundMessage) {
        let json = match reply.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize reply: {}", e);
                return;
            }
        };
        if let Err(e) = self.message_pusher.push_to(sender, &json).await {
            tracing::warn!("Failed to reply to '{}': {}", sender, e);
        }
    }
}
