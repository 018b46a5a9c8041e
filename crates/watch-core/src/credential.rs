//! The bearer credential: cached in memory, persisted through
//! [`SettingsStore`], re-acquired from the user when the backend rejects it.

use std::cell::RefCell;
use std::rc::Rc;

use crate::ports::PromptPort;
use crate::settings::SettingsStore;

pub struct CredentialStore {
    token: RefCell<String>,
    settings: SettingsStore,
    prompt: Rc<dyn PromptPort>,
    prompt_text: String,
}

impl CredentialStore {
    pub fn new(settings: SettingsStore, prompt: Rc<dyn PromptPort>, prompt_text: impl Into<String>) -> Self {
        Self {
            token: RefCell::new(String::new()),
            settings,
            prompt,
            prompt_text: prompt_text.into(),
        }
    }

    pub fn token(&self) -> String {
        self.token.borrow().clone()
    }

    pub fn is_missing(&self) -> bool {
        self.token.borrow().is_empty()
    }

    /// Adopt a token read from storage without re-persisting it.
    pub fn restore(&self, token: impl Into<String>) {
        *self.token.borrow_mut() = token.into();
    }

    /// Ask the user once for a new token and persist whatever they entered.
    /// A dismissed prompt clears the stored token.
    pub async fn request_new(&self) -> String {
        let token = self
            .prompt
            .prompt(&self.prompt_text)
            .map(|t| t.trim().to_string())
            .unwrap_or_default();
        log::info!("Credential {}", if token.is_empty() { "cleared" } else { "updated" });
        *self.token.borrow_mut() = token.clone();
        if let Err(e) = self.settings.save_auth_token(&token).await {
            log::warn!("Failed to persist credential: {}", e);
        }
        token
    }

    /// Tell the user the backend refused the credential, then re-prompt.
    pub async fn reject(&self, notice: &str) {
        self.prompt.alert(notice);
        self.request_new().await;
    }
}
