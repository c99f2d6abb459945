//! Synchronous key-value storage backends
//!
//! `StorageBackend` mirrors the Web Storage API: get/set/remove by key, plus
//! `length` and `key(index)` for enumeration. Methods take `&self` like
//! `web_sys::Storage` does, so in-memory backends use interior mutability.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::BackendError;

pub type BackendResult<T> = Result<T, BackendError>;

/// A synchronous string-to-string store
pub trait StorageBackend {
    fn get_item(&self, key: &str) -> BackendResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> BackendResult<()>;
    /// Removing a missing key is not an error
    fn remove_item(&self, key: &str) -> BackendResult<()>;
    /// Number of keys currently stored
    fn length(&self) -> BackendResult<u32>;
    /// Key at `index` in the backend's enumeration order. Order may change
    /// after any mutation.
    fn key(&self, index: u32) -> BackendResult<Option<String>>;
}

impl<S: StorageBackend + ?Sized> StorageBackend for &S {
    fn get_item(&self, key: &str) -> BackendResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> BackendResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> BackendResult<()> {
        (**self).remove_item(key)
    }

    fn length(&self) -> BackendResult<u32> {
        (**self).length()
    }

    fn key(&self, index: u32) -> BackendResult<Option<String>> {
        (**self).key(index)
    }
}

/// In-memory backend. Keys enumerate in sorted order.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored key/value pair
    pub fn entries(&self) -> Vec<(String, String)> {
        self.items
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get_item(&self, key: &str) -> BackendResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> BackendResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> BackendResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn length(&self) -> BackendResult<u32> {
        Ok(u32::try_from(self.items.borrow().len()).unwrap_or(u32::MAX))
    }

    fn key(&self, index: u32) -> BackendResult<Option<String>> {
        Ok(self.items.borrow().keys().nth(index as usize).cloned())
    }
}

/// Browser LocalStorage (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// LocalStorage of the current window. `None` outside a window context
    /// (workers, Node) or when the browser denies storage access.
    pub fn from_window() -> Option<Self> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if storage.is_none() {
            log::warn!("LocalStorage is not available");
        }
        storage.map(|inner| Self { inner })
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error(op: &'static str, err: wasm_bindgen::JsValue) -> BackendError {
    let message = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    BackendError::new(op, message)
}

#[cfg(target_arch = "wasm32")]
impl StorageBackend for LocalStorage {
    fn get_item(&self, key: &str) -> BackendResult<Option<String>> {
        self.inner.get_item(key).map_err(|e| js_error("getItem", e))
    }

    fn set_item(&self, key: &str, value: &str) -> BackendResult<()> {
        self.inner
            .set_item(key, value)
            .map_err(|e| js_error("setItem", e))
    }

    fn remove_item(&self, key: &str) -> BackendResult<()> {
        self.inner.remove_item(key).map_err(|e| js_error("removeItem", e))
    }

    fn length(&self) -> BackendResult<u32> {
        self.inner.length().map_err(|e| js_error("length", e))
    }

    fn key(&self, index: u32) -> BackendResult<Option<String>> {
        self.inner.key(index).map_err(|e| js_error("key", e))
    }
}
