//! Error types for the store façade and its backends.

/// Failure reported by a storage backend call.
///
/// On the web this wraps whatever the `Storage` API threw (quota exceeded,
/// security errors) rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("storage backend failed during {op}: {message}")]
pub struct BackendError {
    pub op: &'static str,
    pub message: String,
}

impl BackendError {
    pub fn new(op: &'static str, message: impl Into<String>) -> Self {
        Self {
            op,
            message: message.into(),
        }
    }
}

/// Store errors.
///
/// Expired, malformed and tampered entries are not errors; they read as absent.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No key-value store exists in the current execution environment.
    #[error("key-value storage is not available in this environment")]
    Unavailable,

    /// The backend itself rejected an operation.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The value handed to `set` has no JSON representation.
    #[error("value cannot be serialized: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The value nests deeper than stored entries can be read back.
    #[error("value nests {depth} levels deep, limit is {limit}")]
    TooDeep { depth: usize, limit: usize },

    /// A live entry's data does not match the type requested from `get`.
    #[error("entry {key:?} does not match the requested type: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Namespace prefix rejected by configuration.
    #[error("invalid namespace prefix: {reason}")]
    InvalidPrefix { reason: &'static str },
}

pub type Result<T> = std::result::Result<T, StoreError>;
