//! Veil Store - expiring, lightly obfuscated key-value storage
//!
//! Core modules:
//! - `persistence`: Versioned envelope codec and byte obfuscation
//! - `store`: Namespaced set/get/remove/sweep façade
//! - `platform`: Storage backends (LocalStorage on web) and clocks
//! - `config`: Namespace configuration
//! - `web`: JavaScript bindings (WASM only)

pub mod config;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod store;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::StoreConfig;
pub use error::{BackendError, Result, StoreError};
pub use persistence::Envelope;
pub use platform::{Clock, ManualClock, MemoryStorage, StorageBackend, SystemClock};
pub use store::ExpiringStore;

/// Storage format constants
pub mod consts {
    /// Envelope format tag. Entries with any other tag read as absent.
    pub const ENVELOPE_VERSION: u32 = 1;

    /// Deepest array/object nesting accepted for stored data. The envelope
    /// object adds one level, and `serde_json` refuses to parse past 127.
    pub const MAX_DATA_DEPTH: usize = 126;

    /// Namespace prepended to every logical key
    pub const DEFAULT_PREFIX: &str = "veil:";

    /// XOR mask for stored envelopes. Changing it orphans existing data.
    /// The first byte makes every encoded envelope start with a letter
    /// (`'{' ^ 't'` = 0x0F, base64 `D`), so stored strings never parse as JSON.
    pub const OBFUSCATION_SECRET: &[u8] = b"turnstile/veil-store#1";
}
