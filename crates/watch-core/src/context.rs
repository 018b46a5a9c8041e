//! Session context shared by the detector, navigator and toggle.
//!
//! Replaces page-global mutable state: the watch flags, the last-seen reply
//! cache and the credential all live here, behind one `Rc`.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use futures::task::LocalSpawn;
use watch_types::{config::WatchConfig, state::WatchState};

use crate::credential::CredentialStore;
use crate::fetcher::ConversationFetcher;
use crate::ports::*;
use crate::settings::SettingsStore;

/// Every adapter the core talks to
#[derive(Clone)]
pub struct Platform {
    pub http: Rc<dyn HttpPort>,
    pub storage: Rc<dyn StoragePort>,
    pub page: Rc<dyn PagePort>,
    pub prompt: Rc<dyn PromptPort>,
    pub clipboard: Rc<dyn ClipboardPort>,
    pub timer: Rc<dyn TimerPort>,
    pub clock: Rc<dyn ClockPort>,
    pub spawner: Rc<dyn LocalSpawn>,
}

pub struct WatchContext {
    pub config: WatchConfig,
    pub platform: Platform,
    pub settings: SettingsStore,
    pub credential: Rc<CredentialStore>,
    pub fetcher: ConversationFetcher,
    state: RefCell<WatchState>,
    next_block_index: Cell<usize>,
}

impl WatchContext {
    pub fn new(config: WatchConfig, platform: Platform) -> Rc<Self> {
        let settings = SettingsStore::new(platform.storage.clone(), config.storage_keys.clone());
        let credential = Rc::new(CredentialStore::new(
            settings.clone(),
            platform.prompt.clone(),
            config.credential_prompt.clone(),
        ));
        let fetcher = ConversationFetcher::new(
            platform.http.clone(),
            platform.clock.clone(),
            credential.clone(),
            config.clone(),
        );
        Rc::new(Self {
            config,
            platform,
            settings,
            credential,
            fetcher,
            state: RefCell::new(WatchState::default()),
            next_block_index: Cell::new(0),
        })
    }

    pub fn state(&self) -> Ref<'_, WatchState> {
        self.state.borrow()
    }

    pub fn is_listening(&self) -> bool {
        self.state.borrow().listening
    }

    pub fn set_listening(&self, listening: bool) {
        self.state.borrow_mut().listening = listening;
    }

    pub fn is_locked_to_latest(&self) -> bool {
        self.state.borrow().locked_to_latest
    }

    /// Update the lock flag in memory and in durable storage.
    pub async fn set_locked_to_latest(&self, locked: bool) {
        self.state.borrow_mut().locked_to_latest = locked;
        if let Err(e) = self.settings.save_on_latest_conversation(locked).await {
            log::warn!("Failed to persist lock flag: {}", e);
        }
    }

    /// Adopt the lock flag read from storage at startup.
    pub fn restore_locked_to_latest(&self, locked: bool) {
        self.state.borrow_mut().locked_to_latest = locked;
    }

    pub fn set_last_seen_message(&self, text: impl Into<String>) {
        self.state.borrow_mut().last_seen_message = text.into();
    }

    /// Conversation open in the page, if any
    pub fn current_conversation_id(&self) -> Option<String> {
        conversation_id_from_href(&self.platform.page.location_href())
    }

    /// Index the next rendered code panel will be addressed by
    pub fn next_block_index(&self) -> usize {
        self.next_block_index.get()
    }

    /// Mark `count` panel indices as used so element ids stay unique across
    /// every reply rendered in this page view.
    pub fn consume_block_indices(&self, count: usize) {
        self.next_block_index.set(self.next_block_index.get() + count);
    }
}

/// The path segment after `/c/`, without query or fragment.
pub fn conversation_id_from_href(href: &str) -> Option<String> {
    let (_, rest) = href.split_once("/c/")?;
    let id = rest
        .split(|c: char| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or("");
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
