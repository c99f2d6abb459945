//! JavaScript bindings over the window's LocalStorage
//!
//! Values cross the boundary as plain JS values and are converted through
//! `JSON.stringify` / `JSON.parse`.

use serde_json::Value;
use std::time::Duration;
use wasm_bindgen::prelude::*;

use crate::error::StoreError;
use crate::platform::{LocalStorage, SystemClock};
use crate::store::ExpiringStore;

fn store() -> ExpiringStore<LocalStorage, SystemClock> {
    ExpiringStore::local()
}

fn js_err(err: StoreError) -> JsError {
    JsError::new(&err.to_string())
}

/// Install console logging and the panic hook. Safe to call more than once.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialized on repeat calls
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Store `value` under `key`, optionally expiring after `ttl_millis`
#[wasm_bindgen]
pub fn set(key: &str, value: JsValue, ttl_millis: Option<f64>) -> Result<(), JsError> {
    let ttl = match ttl_millis {
        None => None,
        Some(ms) if ms.is_finite() && ms >= 0.0 => Some(Duration::from_millis(ms as u64)),
        Some(ms) => return Err(JsError::new(&format!("invalid ttl: {ms}"))),
    };

    let json = js_sys::JSON::stringify(&value)
        .map_err(|_| JsError::new("value cannot be converted to JSON"))?;
    // `undefined` and functions stringify to undefined; store them as null
    let data: Value = json
        .as_string()
        .map(|text| serde_json::from_str(&text))
        .transpose()
        .map_err(|e| JsError::new(&e.to_string()))?
        .unwrap_or(Value::Null);

    store().set(key, &data, ttl).map_err(js_err)
}

/// Value under `key`, or `null` if absent, expired or tampered
#[wasm_bindgen]
pub fn get(key: &str) -> Result<JsValue, JsError> {
    let Some(data) = store().get::<Value>(key).map_err(js_err)? else {
        return Ok(JsValue::NULL);
    };
    let text = serde_json::to_string(&data).map_err(|e| JsError::new(&e.to_string()))?;
    js_sys::JSON::parse(&text).map_err(|_| JsError::new("stored value is not valid JSON"))
}

#[wasm_bindgen]
pub fn remove(key: &str) -> Result<(), JsError> {
    store().remove(key).map_err(js_err)
}

/// Evict expired and malformed entries; returns how many were removed
#[wasm_bindgen(js_name = flushExpired)]
pub fn flush_expired() -> Result<u32, JsError> {
    let evicted = store().flush_expired().map_err(js_err)?;
    Ok(u32::try_from(evicted).unwrap_or(u32::MAX))
}

/// Remove every entry this library manages; returns how many were removed
#[wasm_bindgen]
pub fn clear() -> Result<u32, JsError> {
    let removed = store().clear().map_err(js_err)?;
    Ok(u32::try_from(removed).unwrap_or(u32::MAX))
}
