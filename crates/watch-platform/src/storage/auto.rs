//! Pick the best settings backend the page allows.
//!
//! Priority: IndexedDB → localStorage → memory (settings lost on reload)

use std::rc::Rc;

use watch_core::ports::StoragePort;

use super::{IndexedDbStorage, LocalStorage, MemoryStorage};

pub async fn auto_detect_storage() -> Rc<dyn StoragePort> {
    match IndexedDbStorage::open().await {
        Ok(idb) => {
            log::info!("Storage backend: IndexedDB");
            return Rc::new(idb);
        }
        Err(e) => log::warn!("IndexedDB unavailable ({}), trying localStorage", e),
    }

    match LocalStorage::open() {
        Ok(local) => {
            log::info!("Storage backend: localStorage");
            Rc::new(local)
        }
        Err(e) => {
            log::warn!("localStorage unavailable ({}), settings will not survive a reload", e);
            Rc::new(MemoryStorage::new())
        }
    }
}
