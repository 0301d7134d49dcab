//! Repository trait 定義
//!
//! ウィジェット状態ストアへのインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{WidgetKind, WidgetPatch, WidgetRecord, WidgetState};

/// Widget state store.
///
/// The store is the only writer of the document; readers get snapshots.
#[async_trait]
pub trait WidgetStateRepository: Send + Sync {
    /// Snapshot of the full document
    async fn get_state(&self) -> WidgetState;

    /// Shallow-merge `patch` into `kind`'s record and return the merged record
    async fn merge(&self, kind: WidgetKind, patch: WidgetPatch) -> WidgetRecord;
}
