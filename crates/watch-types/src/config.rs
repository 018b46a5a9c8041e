use serde::{Deserialize, Serialize};

/// Top-level watcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Base URL of the conversation backend, without a trailing slash
    pub api_base: String,
    /// Cadence of both the change detector and the conversation navigator
    pub poll_interval_ms: u32,
    /// How long the "Copied!" acknowledgement stays on a copy button
    pub copy_ack_ms: u32,
    /// How long a freshly rendered copy button is awaited before giving up
    pub copy_watch_deadline_ms: u32,
    /// Retry policy for attaching the toggle button to the host page
    pub attach_retry: RetryPolicy,
    pub selectors: PageSelectors,
    pub storage_keys: StorageKeys,
    pub credential_prompt: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            api_base: "https://chatgpt.com/backend-api".to_string(),
            poll_interval_ms: 2000,
            copy_ack_ms: 1000,
            copy_watch_deadline_ms: 10_000,
            attach_retry: RetryPolicy::default(),
            selectors: PageSelectors::default(),
            storage_keys: StorageKeys::default(),
            credential_prompt: DEFAULT_CREDENTIAL_PROMPT.to_string(),
        }
    }
}

impl WatchConfig {
    pub fn recent_conversation_url(&self) -> String {
        format!("{}/conversations?offset=0&limit=1&order=updated", self.api_base)
    }

    pub fn conversation_url(&self, id: &str) -> String {
        format!("{}/conversation/{}", self.api_base, id)
    }
}

/// Bounded retry: at most `max_attempts` tries, `delay_ms` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay_ms: 1000,
        }
    }
}

/// CSS selectors into the host page. Owned by the host, so they are
/// configuration rather than constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSelectors {
    /// Heading that opens every rendered reply
    pub reply_heading: String,
    /// Body element that must exist inside a reply before it counts as ready
    pub reply_body: String,
    /// Element inside a cloned reply whose HTML is replaced by the rendering
    pub reply_markdown: String,
    /// Host button that the toggle is cloned from
    pub toggle_anchor: String,
}

impl Default for PageSelectors {
    fn default() -> Self {
        Self {
            reply_heading: "article h6".to_string(),
            reply_body: "p".to_string(),
            reply_markdown: ".markdown p".to_string(),
            toggle_anchor: "button[aria-label='Search the web']".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub auth_token: String,
    pub on_latest_conversation: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            auth_token: "authToken".to_string(),
            on_latest_conversation: "onLatestConversationPage".to_string(),
        }
    }
}

const DEFAULT_CREDENTIAL_PROMPT: &str = "Enter your auth token from the cookie named \
`__Secure-next-auth.session-token.0` \nExample: eyJhbGciOiJ... \n";
