//! Page-lifetime storage. Used when no persistent backend is reachable;
//! settings then last until the next reload.

use std::cell::RefCell;
use std::collections::HashMap;

use async_trait::async_trait;
use watch_core::ports::StoragePort;
use watch_types::Result;

#[derive(Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored settings
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[async_trait(?Send)]
impl StoragePort for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "memory"
    }
}
