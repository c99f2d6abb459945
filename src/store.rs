//! Expiring key-value store
//!
//! Wraps a `StorageBackend` with namespaced keys, optional TTLs and envelope
//! obfuscation. Every operation writes straight through to the backend; there
//! is no in-memory cache.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::StoreConfig;
use crate::consts::MAX_DATA_DEPTH;
use crate::error::{Result, StoreError};
use crate::persistence::{Envelope, decode, encode, nesting_depth};
use crate::platform::{Clock, StorageBackend, SystemClock};

/// Outcome of reading one namespaced entry
enum Lookup {
    Missing,
    Live(Value),
    /// Entry was expired or undecodable and has been deleted
    Evicted,
}

/// Expiring store over an injected backend and clock
#[derive(Debug)]
pub struct ExpiringStore<S, C = SystemClock> {
    /// `None` when the environment has no storage
    backend: Option<S>,
    clock: C,
    config: StoreConfig,
}

/// Absolute expiry for an entry written at `now` with `ttl`
fn expiry_after(now: i64, ttl: Duration) -> i64 {
    now.saturating_add(i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX))
}

impl<S: StorageBackend, C: Clock> ExpiringStore<S, C> {
    /// Create a store over a backend known to exist
    pub fn new(backend: S, clock: C) -> Self {
        Self::from_environment(Some(backend), clock)
    }

    /// Create a store over whatever the environment provided. With `None`,
    /// every operation fails with `StoreError::Unavailable`.
    pub fn from_environment(backend: Option<S>, clock: C) -> Self {
        Self {
            backend,
            clock,
            config: StoreConfig::default(),
        }
    }

    /// Replace the default configuration
    pub fn with_config(mut self, config: StoreConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    /// Access guard run first by every public operation
    fn backend(&self) -> Result<&S> {
        self.backend.as_ref().ok_or(StoreError::Unavailable)
    }

    /// Store `value` under `key`, replacing any previous entry.
    ///
    /// With a `ttl` the entry expires at now + ttl; without one it never
    /// expires. Values nested deeper than `MAX_DATA_DEPTH` are rejected
    /// with `StoreError::TooDeep` and nothing is written.
    pub fn set<T>(&self, key: &str, value: &T, ttl: Option<Duration>) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let backend = self.backend()?;
        let data = serde_json::to_value(value).map_err(StoreError::Serialize)?;
        let depth = nesting_depth(&data);
        if depth > MAX_DATA_DEPTH {
            return Err(StoreError::TooDeep {
                depth,
                limit: MAX_DATA_DEPTH,
            });
        }
        let expiry = ttl.map(|ttl| expiry_after(self.clock.now_millis(), ttl));
        let raw = encode(&Envelope::new(data, expiry)).map_err(StoreError::Serialize)?;

        backend.set_item(&self.config.namespaced(key), &raw)?;
        log::debug!("Stored {key:?} (expiry: {expiry:?})");
        Ok(())
    }

    /// Fetch the value under `key`.
    ///
    /// Returns `Ok(None)` when nothing is stored, or when the entry is expired
    /// or undecodable; such entries are deleted as a side effect. A live entry
    /// whose data does not fit `T` is left in place and reported as
    /// `StoreError::Deserialize`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let backend = self.backend()?;
        let now = self.clock.now_millis();

        match self.lookup(backend, &self.config.namespaced(key), now)? {
            Lookup::Live(data) => serde_json::from_value(data).map(Some).map_err(|source| {
                StoreError::Deserialize {
                    key: key.to_string(),
                    source,
                }
            }),
            Lookup::Missing | Lookup::Evicted => Ok(None),
        }
    }

    /// Whether `get` would return a value. Evicts dead entries like `get`.
    pub fn contains(&self, key: &str) -> Result<bool> {
        let backend = self.backend()?;
        let now = self.clock.now_millis();
        let lookup = self.lookup(backend, &self.config.namespaced(key), now)?;
        Ok(matches!(lookup, Lookup::Live(_)))
    }

    /// Delete the entry under `key`. Missing keys are fine.
    pub fn remove(&self, key: &str) -> Result<()> {
        let backend = self.backend()?;
        backend.remove_item(&self.config.namespaced(key))?;
        log::debug!("Removed {key:?}");
        Ok(())
    }

    /// Delete every namespaced entry that is expired or undecodable.
    /// Keys outside the namespace are not read. Returns the number evicted.
    pub fn flush_expired(&self) -> Result<usize> {
        let backend = self.backend()?;
        let now = self.clock.now_millis();

        let mut evicted = 0;
        for storage_key in snapshot_keys(backend)? {
            if !self.config.owns(&storage_key) {
                continue;
            }
            if let Lookup::Evicted = self.lookup(backend, &storage_key, now)? {
                evicted += 1;
            }
        }

        log::info!("Sweep evicted {evicted} entries");
        Ok(evicted)
    }

    /// Delete every namespaced entry, live or not. Returns the number deleted.
    pub fn clear(&self) -> Result<usize> {
        let backend = self.backend()?;

        let mut removed = 0;
        for storage_key in snapshot_keys(backend)? {
            if self.config.owns(&storage_key) {
                backend.remove_item(&storage_key)?;
                removed += 1;
            }
        }

        log::info!("Cleared {removed} entries");
        Ok(removed)
    }

    /// Logical keys of every namespaced entry, without validating them
    pub fn keys(&self) -> Result<Vec<String>> {
        let backend = self.backend()?;
        let keys = snapshot_keys(backend)?
            .iter()
            .filter_map(|k| self.config.logical(k))
            .map(str::to_string)
            .collect();
        Ok(keys)
    }

    /// Read one entry, deleting it if it is expired at `now` or undecodable
    fn lookup(&self, backend: &S, storage_key: &str, now: i64) -> Result<Lookup> {
        let Some(raw) = backend.get_item(storage_key)? else {
            return Ok(Lookup::Missing);
        };

        match decode(&raw) {
            None => {
                log::warn!("Dropping malformed entry {storage_key:?}");
                backend.remove_item(storage_key)?;
                Ok(Lookup::Evicted)
            }
            Some(envelope) if envelope.is_expired(now) => {
                log::debug!("Dropping expired entry {storage_key:?}");
                backend.remove_item(storage_key)?;
                Ok(Lookup::Evicted)
            }
            Some(envelope) => Ok(Lookup::Live(envelope.data)),
        }
    }
}

/// Copy the backend's key list before mutating, since removals may reorder
/// the live enumeration.
fn snapshot_keys<S: StorageBackend>(backend: &S) -> Result<Vec<String>> {
    let len = backend.length()?;
    let mut keys = Vec::with_capacity(len as usize);
    for index in 0..len {
        if let Some(key) = backend.key(index)? {
            keys.push(key);
        }
    }
    Ok(keys)
}

#[cfg(target_arch = "wasm32")]
impl ExpiringStore<crate::platform::LocalStorage, SystemClock> {
    /// Store over the window's LocalStorage and the browser clock
    pub fn local() -> Self {
        Self::from_environment(crate::platform::LocalStorage::from_window(), SystemClock)
    }
}
