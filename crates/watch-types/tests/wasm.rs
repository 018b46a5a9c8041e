//! WASM-target tests for watch-types.
//!
//! Mirrors the native unit tests but runs under wasm32-unknown-unknown
//! via `wasm-pack test --node`.

use wasm_bindgen_test::*;

use chrono::{TimeZone, Utc};
use watch_types::config::*;
use watch_types::conversation::*;
use watch_types::error::*;
use watch_types::state::*;

// ─── Conversation Tests ──────────────────────────────────

#[wasm_bindgen_test]
fn summary_age_is_whole_minutes() {
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 2, 59).unwrap();
    let summary = ConversationSummary::at("c-1", created, now);
    assert_eq!(summary.age_minutes, 2);
    assert!(!summary.is_fresh());
}

#[wasm_bindgen_test]
fn page_decodes_first_item() {
    let page: ConversationPage =
        serde_json::from_str(r#"{"items":[{"id":"c-9","create_time":"2024-05-01T12:00:00Z"}],"total":1}"#)
            .unwrap();
    assert_eq!(page.items[0].id, "c-9");
    assert!(page.items[0].create_time.to_utc().is_some());
}

#[wasm_bindgen_test]
fn transcript_last_assistant_text() {
    let body = r#"{"mapping":{
        "a":{"message":{"author":{"role":"assistant"},"content":{"parts":["first"]}}},
        "u":{"message":{"author":{"role":"user"},"content":{"parts":["question"]}}},
        "b":{"message":{"author":{"role":"assistant"},"content":{"parts":["second"]}}}
    }}"#;
    let detail: ConversationDetail = serde_json::from_str(body).unwrap();
    let transcript = ConversationTranscript::from(detail);
    assert_eq!(transcript.last_assistant_text(), Some("second"));
}

// ─── Config Tests ────────────────────────────────────────

#[wasm_bindgen_test]
fn config_default_urls() {
    let config = WatchConfig::default();
    assert_eq!(config.poll_interval_ms, 2000);
    assert!(config.recent_conversation_url().ends_with("/conversations?offset=0&limit=1&order=updated"));
    assert!(config.conversation_url("abc").ends_with("/conversation/abc"));
}

// ─── State & Error Tests ─────────────────────────────────

#[wasm_bindgen_test]
fn state_starts_idle() {
    let state = WatchState::default();
    assert!(!state.listening);
    assert!(!state.locked_to_latest);
}

#[wasm_bindgen_test]
fn error_display() {
    let err = WatchError::Http {
        status: 401,
        url: "https://x/y".to_string(),
    };
    assert_eq!(err.to_string(), "HTTP 401 from https://x/y");
}
