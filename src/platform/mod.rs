//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Storage (LocalStorage on web, in-memory elsewhere)
//! - Time (wall clock on web and native, manual clock for tests)

pub mod storage;
pub mod time;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
pub use storage::{MemoryStorage, StorageBackend};
pub use time::{Clock, ManualClock, SystemClock};
