//! Versioned envelope pairing a value with its optional expiry

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::obfuscation::{obscure, reveal};
use crate::consts::ENVELOPE_VERSION;

/// Persisted record. Serialized with single-letter field names to keep
/// stored strings short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Format tag, must equal `ENVELOPE_VERSION` to decode
    #[serde(rename = "v")]
    pub version: u32,
    /// Absolute expiry in Unix epoch milliseconds. `None` = never expires.
    #[serde(rename = "e")]
    pub expiry: Option<i64>,
    /// Stored value
    #[serde(rename = "d")]
    pub data: Value,
}

impl Envelope {
    /// Create an envelope at the current format version
    pub fn new(data: Value, expiry: Option<i64>) -> Self {
        Self {
            version: ENVELOPE_VERSION,
            expiry,
            data,
        }
    }

    /// Check expiry against a reference time (epoch ms)
    pub fn is_expired(&self, now: i64) -> bool {
        is_expired(self.expiry, now)
    }
}

/// An entry is expired once the reference time reaches its expiry.
/// Entries without expiry never expire.
#[inline]
pub fn is_expired(expiry: Option<i64>, now: i64) -> bool {
    expiry.is_some_and(|at| now >= at)
}

/// Number of nested arrays/objects in `value`; scalars are depth 0.
///
/// Walks iteratively so arbitrarily deep input cannot exhaust the stack.
pub fn nesting_depth(value: &Value) -> usize {
    let mut deepest = 0;
    let mut pending = vec![(value, 0usize)];
    while let Some((value, depth)) = pending.pop() {
        match value {
            Value::Array(items) => {
                deepest = deepest.max(depth + 1);
                pending.extend(items.iter().map(|child| (child, depth + 1)));
            }
            Value::Object(map) => {
                deepest = deepest.max(depth + 1);
                pending.extend(map.values().map(|child| (child, depth + 1)));
            }
            _ => {}
        }
    }
    deepest
}

/// Serialize and obfuscate an envelope into its stored form
pub fn encode(envelope: &Envelope) -> serde_json::Result<String> {
    let json = serde_json::to_vec(envelope)?;
    Ok(obscure(&json))
}

/// Recover an envelope from its stored form.
///
/// Returns `None` for anything that is not base64, does not unmask to JSON,
/// has the wrong shape (missing `d`, non-integer `e`) or carries another
/// version tag.
pub fn decode(raw: &str) -> Option<Envelope> {
    let json = reveal(raw)?;
    let envelope: Envelope = serde_json::from_slice(&json).ok()?;
    (envelope.version == ENVELOPE_VERSION).then_some(envelope)
}
