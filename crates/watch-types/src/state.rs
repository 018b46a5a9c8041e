use serde::{Deserialize, Serialize};

/// Process-wide watch state for one page view.
///
/// Written by the toggle (`listening`, `locked_to_latest`), the navigator
/// (`locked_to_latest`) and the change detector (`last_seen_message`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchState {
    pub listening: bool,
    pub locked_to_latest: bool,
    pub last_seen_message: String,
}

/// What survives a page reload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedSettings {
    pub auth_token: String,
    pub on_latest_conversation: bool,
}
