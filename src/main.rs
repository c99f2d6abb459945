//! Veil Store demo entry point
//!
//! Native builds exercise the store against an in-memory backend. The web
//! build is a library; JavaScript calls the exports in `veil_store::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Veil Store (native) starting...");

    if let Err(e) = demo() {
        log::error!("Demo failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry points live in veil_store::web, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo() -> veil_store::Result<()> {
    use std::time::Duration;
    use veil_store::{ExpiringStore, ManualClock, MemoryStorage, StorageBackend};

    let storage = MemoryStorage::new();
    let clock = ManualClock::new(0);
    let store = ExpiringStore::new(&storage, &clock);

    store.set("greeting", "hello", None)?;
    store.set("session", &serde_json::json!({"user": 7}), Some(Duration::from_secs(1)))?;
    storage.set_item("unrelated", "left alone")?;

    for (key, raw) in storage.entries() {
        println!("{key:<16} {raw}");
    }

    clock.advance(2_000);
    let evicted = store.flush_expired()?;
    println!("\nAfter 2s: evicted {evicted}, remaining {:?}", store.keys()?);
    println!(
        "greeting = {:?}",
        store.get::<String>("greeting")?.unwrap_or_default()
    );
    Ok(())
}
