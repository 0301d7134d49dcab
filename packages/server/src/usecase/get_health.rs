//! UseCase: ヘルスチェック

use std::sync::Arc;

use onair_shared::time::{Clock, elapsed_secs};

use crate::domain::{MessagePusher, Partition};

/// Live registry sizes and process uptime.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    pub overlays: usize,
    pub controllers: usize,
    pub uptime_secs: f64,
}

/// ヘルスチェックのユースケース
pub struct GetHealthUseCase {
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
    /// プロセス起動時刻（Unix ミリ秒）
    started_at: i64,
}

impl GetHealthUseCase {
    /// `started_at` is taken from `clock` at construction.
    pub fn new(message_pusher: Arc<dyn MessagePusher>, clock: Arc<dyn Clock>) -> Self {
        let started_at = clock.now_millis();
        Self {
            message_pusher,
            clock,
            started_at,
        }
    }

    pub async fn execute(&self) -> HealthReport {
        HealthReport {
            overlays: self.message_pusher.count(Partition::Overlays).await,
            controllers: self.message_pusher.count(Partition::Controllers).await,
            uptime_secs: elapsed_secs(self.started_at, self.clock.now_millis()),
        }
    }
}
