//! Remote conversation fetcher.
//!
//! Two authenticated reads against the conversation backend. Neither call
//! fails outward: a refused credential triggers one re-prompt and yields
//! `None`, and so does every transport or decoding problem, so a poll
//! cycle simply skips.

use std::rc::Rc;

use watch_types::{
    config::WatchConfig,
    conversation::{ConversationDetail, ConversationPage, ConversationSummary, ConversationTranscript},
    WatchError,
};

use crate::credential::CredentialStore;
use crate::ports::{ClockPort, HttpPort};

pub struct ConversationFetcher {
    http: Rc<dyn HttpPort>,
    clock: Rc<dyn ClockPort>,
    credential: Rc<CredentialStore>,
    config: WatchConfig,
}

impl ConversationFetcher {
    pub fn new(
        http: Rc<dyn HttpPort>,
        clock: Rc<dyn ClockPort>,
        credential: Rc<CredentialStore>,
        config: WatchConfig,
    ) -> Self {
        Self {
            http,
            clock,
            credential,
            config,
        }
    }

    /// The most recently updated conversation with its age at this instant.
    pub async fn recent_conversation(&self) -> Option<ConversationSummary> {
        let url = self.config.recent_conversation_url();
        let body = self
            .authorized_get(&url, "Failed to get recent conversation ID, auth token may be invalid")
            .await?;

        let page: ConversationPage = match serde_json::from_str(&body) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Unexpected conversation list shape: {}", e);
                return None;
            }
        };
        let latest = page.items.into_iter().next()?;
        let created_at = match latest.create_time.to_utc() {
            Some(t) => t,
            None => {
                log::warn!("Conversation {} has an unreadable create_time", latest.id);
                return None;
            }
        };
        Some(ConversationSummary::at(latest.id, created_at, self.clock.now()))
    }

    /// Text of the last assistant reply in `conversation_id`.
    pub async fn last_assistant_message(&self, conversation_id: Option<&str>) -> Option<String> {
        let Some(id) = conversation_id.filter(|id| !id.is_empty()) else {
            log::debug!("No conversation ID found");
            return None;
        };
        let url = self.config.conversation_url(id);
        let body = self
            .authorized_get(&url, "Failed to get latest conversations, auth token may be invalid")
            .await?;

        let transcript: ConversationTranscript = match serde_json::from_str::<ConversationDetail>(&body) {
            Ok(detail) => detail.into(),
            Err(e) => {
                log::warn!("Unexpected transcript shape for {}: {}", id, e);
                return None;
            }
        };
        let text = transcript.last_assistant_text().map(str::to_string);
        if text.is_none() {
            log::debug!("No assistant message in conversation {}", id);
        }
        text
    }

    async fn authorized_get(&self, url: &str, rejection_notice: &str) -> Option<String> {
        let token = self.credential.token();
        match self.http.get(url, &token).await {
            Ok(resp) if resp.is_success() => Some(resp.body),
            Ok(resp) => {
                let err = WatchError::Http {
                    status: resp.status,
                    url: url.to_string(),
                };
                log::error!("{}", err);
                self.credential.reject(rejection_notice).await;
                None
            }
            Err(e) => {
                log::warn!("Request to {} failed: {}", url, e);
                None
            }
        }
    }
}
