//! Repository 実装
//!
//! - `inmemory`: プロセス内メモリに状態を保持する実装（再起動で消える）

pub mod inmemory;

pub use inmemory::InMemoryWidgetStateRepository;
