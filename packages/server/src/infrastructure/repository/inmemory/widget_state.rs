//! InMemory WidgetState Repository 実装
//!
//! ドメイン層が定義する WidgetStateRepository trait の具体的な実装。
//! 状態はプロセス内にのみ存在し、永続化はしません。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{WidgetKind, WidgetPatch, WidgetRecord, WidgetState, WidgetStateRepository};

/// インメモリ WidgetState Repository 実装
pub struct InMemoryWidgetStateRepository {
    /// ウィジェット状態ドキュメント
    state: Arc<Mutex<WidgetState>>,
}

impl InMemoryWidgetStateRepository {
    /// 新しい InMemoryWidgetStateRepository を作成
    pub fn new(state: Arc<Mutex<WidgetState>>) -> Self {
        Self { state }
    }
}

impl Default for InMemoryWidgetStateRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(WidgetState::default())))
    }
}

#[async_trait]
impl WidgetStateRepository for InMemoryWidgetStateRepository {
    async fn get_state(&self) -> WidgetState {
        self.state.lock().await.clone()
    }

    async fn merge(&self, kind: WidgetKind, patch: WidgetPatch) -> WidgetRecord {
        let mut state = self.state.lock().await;
        if patch.is_empty() {
            tracing::debug!("Empty patch for '{}', state unchanged", kind);
        } else {
            tracing::debug!("Merging {} key(s) into '{}'", patch.len(), kind);
        }
        state.merge(kind, patch).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch(value: serde_json::Value) -> WidgetPatch {
        WidgetPatch::from_payload(Some(value)).unwrap()
    }

    #[tokio::test]
    async fn test_get_state_returns_defaults() {
        // テスト項目: 初期状態では既定値のドキュメントが返る
        // given (前提条件):
        let repository = InMemoryWidgetStateRepository::default();

        // when (操作):
        let state = repository.get_state().await;

        // then (期待する結果):
        assert_eq!(state, WidgetState::default());
    }

    #[tokio::test]
    async fn test_merge_is_visible_to_later_reads() {
        // テスト項目: マージ結果が返され、その後の読み取りにも反映される
        // given (前提条件):
        let repository = InMemoryWidgetStateRepository::default();

        // when (操作):
        let merged = repository
            .merge(WidgetKind::Popup, patch(json!({"title": "Raid!", "duration": 3000})))
            .await;

        // then (期待する結果):
        assert_eq!(merged.get("title"), Some(&json!("Raid!")));
        assert_eq!(merged.get("message"), Some(&json!("")));
        let state = repository.get_state().await;
        assert_eq!(state.popup, merged);
        assert_eq!(state.ticker, WidgetKind::Ticker.default_record());
    }

    #[tokio::test]
    async fn test_snapshot_is_detached_from_store() {
        // テスト項目: 取得したスナップショットは後続の更新の影響を受けない
        // given (前提条件):
        let repository = InMemoryWidgetStateRepository::default();
        let before = repository.get_state().await;

        // when (操作):
        repository
            .merge(WidgetKind::Brb, patch(json!({"active": true})))
            .await;

        // then (期待する結果):
        assert_eq!(before.brb.get("active"), Some(&json!(false)));
        assert_eq!(
            repository.get_state().await.brb.get("active"),
            Some(&json!(true))
        );
    }
}
