//! Durable settings: the bearer credential and the "locked to latest" flag.
//!
//! Values are stored JSON-encoded under the configured keys so a reload
//! can resume the right watch branch.

use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use watch_types::{config::StorageKeys, state::PersistedSettings, Result};

use crate::ports::StoragePort;

#[derive(Clone)]
pub struct SettingsStore {
    storage: Rc<dyn StoragePort>,
    keys: StorageKeys,
}

impl SettingsStore {
    pub fn new(storage: Rc<dyn StoragePort>, keys: StorageKeys) -> Self {
        Self { storage, keys }
    }

    /// Read everything at once. Missing or unreadable values fall back to
    /// their defaults.
    pub async fn load(&self) -> PersistedSettings {
        let auth_token = self
            .read::<String>(&self.keys.auth_token)
            .await
            .unwrap_or_default();
        let on_latest_conversation = self
            .read::<bool>(&self.keys.on_latest_conversation)
            .await
            .unwrap_or(false);
        PersistedSettings {
            auth_token,
            on_latest_conversation,
        }
    }

    /// Persist `token`; an empty token removes the stored one.
    pub async fn save_auth_token(&self, token: &str) -> Result<()> {
        if token.is_empty() {
            return self.storage.delete(&self.keys.auth_token).await;
        }
        self.write(&self.keys.auth_token, &token).await
    }

    pub async fn save_on_latest_conversation(&self, locked: bool) -> Result<()> {
        self.write(&self.keys.on_latest_conversation, &locked).await
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.storage.get(key).await {
            Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    log::warn!("Ignoring unreadable setting {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("Failed to read setting {} from {}: {}", key, self.storage.backend_name(), e);
                None
            }
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.storage.set(key, &bytes).await
    }
}
