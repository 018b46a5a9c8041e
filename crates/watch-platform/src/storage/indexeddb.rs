//! IndexedDB backend for watcher settings.
//!
//! One object store of byte values keyed by setting name. Requests are
//! callback based; [`request_done`] turns one into a `JsFuture`.

use async_trait::async_trait;
use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{IdbDatabase, IdbObjectStore, IdbRequest, IdbTransactionMode};

use watch_core::ports::StoragePort;
use watch_types::{Result, WatchError};

const DB_NAME: &str = "reply_watch";
const STORE_NAME: &str = "settings";
const DB_VERSION: u32 = 1;

pub struct IndexedDbStorage {
    db: IdbDatabase,
}

fn idb_err(e: JsValue) -> WatchError {
    WatchError::Storage(format!("{:?}", e))
}

impl IndexedDbStorage {
    /// Open the settings database, creating the store on first use.
    pub async fn open() -> Result<Self> {
        let factory = web_sys::window()
            .ok_or_else(|| WatchError::Storage("No window object".to_string()))?
            .indexed_db()
            .map_err(idb_err)?
            .ok_or_else(|| WatchError::Storage("IndexedDB not available".to_string()))?;

        let open_req = factory.open_with_u32(DB_NAME, DB_VERSION).map_err(idb_err)?;

        let upgrading = open_req.clone();
        let on_upgrade = Closure::once(move |_: web_sys::Event| {
            let Ok(result) = upgrading.result() else {
                return;
            };
            if let Ok(db) = result.dyn_into::<IdbDatabase>() {
                if !db.object_store_names().contains(STORE_NAME) {
                    if let Err(e) = db.create_object_store(STORE_NAME) {
                        log::error!("Could not create store {}: {:?}", STORE_NAME, e);
                    }
                }
            }
        });
        open_req.set_onupgradeneeded(Some(on_upgrade.as_ref().unchecked_ref()));
        on_upgrade.forget();

        let db = JsFuture::from(request_done(&open_req))
            .await
            .map_err(idb_err)?
            .dyn_into::<IdbDatabase>()
            .map_err(idb_err)?;
        log::debug!("Opened IndexedDB {} v{}", DB_NAME, DB_VERSION);
        Ok(Self { db })
    }

    fn store(&self, mode: IdbTransactionMode) -> Result<IdbObjectStore> {
        self.db
            .transaction_with_str_and_mode(STORE_NAME, mode)
            .and_then(|tx| tx.object_store(STORE_NAME))
            .map_err(idb_err)
    }
}

#[async_trait(?Send)]
impl StoragePort for IndexedDbStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let req = self
            .store(IdbTransactionMode::Readonly)?
            .get(&JsValue::from_str(key))
            .map_err(idb_err)?;
        let value = JsFuture::from(request_done(&req)).await.map_err(idb_err)?;
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        Ok(Some(Uint8Array::new(&value).to_vec()))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let req = self
            .store(IdbTransactionMode::Readwrite)?
            .put_with_key(&Uint8Array::from(value), &JsValue::from_str(key))
            .map_err(idb_err)?;
        JsFuture::from(request_done(&req)).await.map_err(idb_err)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let req = self
            .store(IdbTransactionMode::Readwrite)?
            .delete(&JsValue::from_str(key))
            .map_err(idb_err)?;
        JsFuture::from(request_done(&req)).await.map_err(idb_err)?;
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "indexeddb"
    }
}

/// Promise settled by the request's success or error callback.
fn request_done(req: &IdbRequest) -> js_sys::Promise {
    let req = req.clone();
    js_sys::Promise::new(&mut move |resolve, reject| {
        let finished = req.clone();
        let on_success = Closure::once(move |_: web_sys::Event| {
            let result = finished.result().unwrap_or(JsValue::UNDEFINED);
            let _ = resolve.call1(&JsValue::NULL, &result);
        });
        let on_error = Closure::once(move |_: web_sys::Event| {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("IndexedDB request failed"));
        });
        req.set_onsuccess(Some(on_success.as_ref().unchecked_ref()));
        req.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_success.forget();
        on_error.forget();
    })
}
