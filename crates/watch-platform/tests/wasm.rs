//! WASM-target tests for watch-platform (Node.js runtime).
//!
//! Covers the adapters that need no document: MemoryStorage, the timer
//! and clock, and the spawner.
//!
//! IndexedDB, localStorage and DOM adapters require a browser.

use wasm_bindgen_test::*;

use std::cell::Cell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::task::LocalSpawnExt;
use watch_core::ports::{ClockPort, StoragePort, TimerPort};
use watch_platform::storage::MemoryStorage;
use watch_platform::{BrowserClock, BrowserSpawner, BrowserTimer};

// ─── MemoryStorage Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn memory_storage_backend_name() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.backend_name(), "memory");
    assert!(storage.is_empty());
}

#[wasm_bindgen_test]
async fn memory_storage_set_get_delete() {
    let storage = MemoryStorage::new();
    assert!(storage.get("authToken").await.unwrap().is_none());

    storage.set("authToken", b"\"abc\"").await.unwrap();
    assert_eq!(storage.get("authToken").await.unwrap(), Some(b"\"abc\"".to_vec()));
    assert_eq!(storage.len(), 1);

    storage.delete("authToken").await.unwrap();
    assert!(storage.get("authToken").await.unwrap().is_none());
    assert!(storage.is_empty());
}

#[wasm_bindgen_test]
async fn memory_storage_overwrite() {
    let storage = MemoryStorage::new();
    storage.set("onLatestConversationPage", b"false").await.unwrap();
    storage.set("onLatestConversationPage", b"true").await.unwrap();
    assert_eq!(
        storage.get("onLatestConversationPage").await.unwrap(),
        Some(b"true".to_vec())
    );
}

// ─── Timer & Spawner Tests ───────────────────────────────

#[wasm_bindgen_test]
async fn timer_sleep_elapses() {
    let clock = BrowserClock;
    let before = clock.now();
    BrowserTimer.sleep(20).await;
    assert!(clock.now() >= before);
}

#[wasm_bindgen_test]
async fn spawner_runs_task() {
    let ran = Rc::new(Cell::new(false));
    let (tx, rx) = oneshot::channel();
    let flag = ran.clone();
    BrowserSpawner
        .spawn_local(async move {
            flag.set(true);
            let _ = tx.send(());
        })
        .unwrap();
    rx.await.unwrap();
    assert!(ran.get());
}
