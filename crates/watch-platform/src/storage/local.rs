//! `window.localStorage` backend.
//!
//! Survives reloads but holds strings only. Settings are JSON, so values
//! are stored as UTF-8 text under a namespaced key.

use async_trait::async_trait;
use watch_core::ports::StoragePort;
use watch_types::{Result, WatchError};

const KEY_PREFIX: &str = "reply-watch:";

pub struct LocalStorage {
    store: web_sys::Storage,
}

fn storage_err(e: wasm_bindgen::JsValue) -> WatchError {
    WatchError::Storage(format!("{:?}", e))
}

impl LocalStorage {
    pub fn open() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| WatchError::Storage("No window object".to_string()))?;
        let store = window
            .local_storage()
            .map_err(storage_err)?
            .ok_or_else(|| WatchError::Storage("localStorage not available".to_string()))?;
        Ok(Self { store })
    }

    fn namespaced(key: &str) -> String {
        format!("{}{}", KEY_PREFIX, key)
    }
}

#[async_trait(?Send)]
impl StoragePort for LocalStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value = self
            .store
            .get_item(&Self::namespaced(key))
            .map_err(storage_err)?;
        Ok(value.map(String::into_bytes))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let text = std::str::from_utf8(value)
            .map_err(|e| WatchError::Storage(format!("Value for {} is not UTF-8: {}", key, e)))?;
        self.store
            .set_item(&Self::namespaced(key), text)
            .map_err(storage_err)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.store
            .remove_item(&Self::namespaced(key))
            .map_err(storage_err)
    }

    fn backend_name(&self) -> &str {
        "localStorage"
    }
}
