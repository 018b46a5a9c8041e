#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::conversation::*;
    use crate::error::*;
    use crate::state::*;
    use chrono::{TimeZone, Utc};

    // ─── ConversationSummary Tests ───────────────────────────

    #[test]
    fn test_summary_age_is_floored() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 2, 59).unwrap();
        let summary = ConversationSummary::at("abc", created, now);
        assert_eq!(summary.id, "abc");
        assert_eq!(summary.age_minutes, 2);
        assert!(!summary.is_fresh());
    }

    #[test]
    fn test_summary_under_a_minute_is_fresh() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 59).unwrap();
        let summary = ConversationSummary::at("abc", created, now);
        assert_eq!(summary.age_minutes, 0);
        assert!(summary.is_fresh());
    }

    #[test]
    fn test_summary_from_the_future_is_negative() {
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 30).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let summary = ConversationSummary::at("abc", created, now);
        assert_eq!(summary.age_minutes, -1);
        assert!(summary.is_fresh());
    }

    // ─── Timestamp Tests ─────────────────────────────────────

    #[test]
    fn test_timestamp_rfc3339() {
        let ts: Timestamp = serde_json::from_str(r#""2024-05-01T12:00:00.500000+00:00""#).unwrap();
        let dt = ts.to_utc().unwrap();
        assert_eq!(dt.timestamp_millis(), 1714564800500);
    }

    #[test]
    fn test_timestamp_epoch_seconds() {
        let ts: Timestamp = serde_json::from_str("1714564800.25").unwrap();
        assert_eq!(ts.to_utc().unwrap().timestamp_millis(), 1714564800250);
    }

    #[test]
    fn test_timestamp_garbage() {
        let ts = Timestamp::Text("yesterday".to_string());
        assert!(ts.to_utc().is_none());
    }

    #[test]
    fn test_conversation_page_decode() {
        let json = r#"{"items":[{"id":"c1","title":"x","create_time":"2024-05-01T12:00:00Z"}],"total":1}"#;
        let page: ConversationPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "c1");
    }

    #[test]
    fn test_conversation_page_without_items() {
        let page: ConversationPage = serde_json::from_str("{}").unwrap();
        assert!(page.items.is_empty());
    }

    // ─── Transcript Tests ────────────────────────────────────

    fn transcript(json: &str) -> ConversationTranscript {
        let detail: ConversationDetail = serde_json::from_str(json).unwrap();
        detail.into()
    }

    #[test]
    fn test_transcript_keeps_mapping_order() {
        // Keys deliberately sort differently from their document order.
        let t = transcript(
            r#"{"mapping":{
                "zzz":{"message":{"author":{"role":"assistant"},"content":{"parts":["first"]}}},
                "aaa":{"message":{"author":{"role":"user"},"content":{"parts":["question"]}}},
                "mmm":{"message":{"author":{"role":"assistant"},"content":{"parts":["second"]}}}
            }}"#,
        );
        let ids: Vec<&str> = t.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["zzz", "aaa", "mmm"]);
        assert_eq!(t.last_assistant_text(), Some("second"));
    }

    #[test]
    fn test_transcript_prefers_structured_text() {
        let t = transcript(
            r#"{"mapping":{"n1":{"message":{"author":{"role":"assistant"},
                "content":{"parts":[{"text":"structured"}]}}}}}"#,
        );
        assert_eq!(t.last_assistant_text(), Some("structured"));
    }

    #[test]
    fn test_transcript_skips_nodes_without_message() {
        let t = transcript(
            r#"{"mapping":{
                "root":{"message":null,"parent":null},
                "n1":{"message":{"author":{"role":"assistant"},"content":{"parts":["hi"]}}},
                "n2":{}
            }}"#,
        );
        assert_eq!(t.nodes.len(), 1);
        assert_eq!(t.last_assistant_text(), Some("hi"));
    }

    #[test]
    fn test_transcript_unknown_roles_are_other() {
        let t = transcript(
            r#"{"mapping":{"n1":{"message":{"author":{"role":"tool"},"content":{"parts":["x"]}}}}}"#,
        );
        assert_eq!(t.nodes[0].role, Role::Other);
        assert!(t.last_assistant_text().is_none());
    }

    #[test]
    fn test_transcript_trailing_assistant_without_text() {
        let t = transcript(
            r#"{"mapping":{
                "n1":{"message":{"author":{"role":"assistant"},"content":{"parts":["old"]}}},
                "n2":{"message":{"author":{"role":"assistant"},"content":{"parts":[]}}}
            }}"#,
        );
        assert!(t.last_assistant_text().is_none());
    }

    #[test]
    fn test_transcript_null_mapping() {
        let t = transcript(r#"{"mapping":null}"#);
        assert!(t.nodes.is_empty());
    }

    #[test]
    fn test_first_part_text_falls_back_on_empty_text() {
        let content = NodeContent {
            parts: vec![serde_json::json!({"text": ""})],
        };
        assert!(content.first_part_text().is_none());

        let content = NodeContent {
            parts: vec![serde_json::json!(42)],
        };
        assert!(content.first_part_text().is_none());
    }

    // ─── Config Tests ────────────────────────────────────────

    #[test]
    fn test_config_defaults() {
        let config = WatchConfig::default();
        assert_eq!(config.poll_interval_ms, 2000);
        assert_eq!(config.copy_ack_ms, 1000);
        assert_eq!(config.attach_retry, RetryPolicy { max_attempts: 10, delay_ms: 1000 });
        assert_eq!(config.storage_keys.auth_token, "authToken");
        assert_eq!(config.storage_keys.on_latest_conversation, "onLatestConversationPage");
        assert_eq!(config.selectors.reply_heading, "article h6");
    }

    #[test]
    fn test_config_urls() {
        let config = WatchConfig {
            api_base: "https://example.test/api".to_string(),
            ..WatchConfig::default()
        };
        assert_eq!(
            config.recent_conversation_url(),
            "https://example.test/api/conversations?offset=0&limit=1&order=updated"
        );
        assert_eq!(config.conversation_url("c-1"), "https://example.test/api/conversation/c-1");
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let config: WatchConfig = serde_json::from_str(r#"{"poll_interval_ms": 500}"#).unwrap();
        assert_eq!(config.poll_interval_ms, 500);
        assert_eq!(config.copy_ack_ms, 1000);
        assert_eq!(config.selectors, PageSelectors::default());
    }

    // ─── State / Error Tests ─────────────────────────────────

    #[test]
    fn test_watch_state_default() {
        let state = WatchState::default();
        assert!(!state.listening);
        assert!(!state.locked_to_latest);
        assert!(state.last_seen_message.is_empty());
    }

    #[test]
    fn test_error_display() {
        let err = WatchError::Http { status: 401, url: "https://x/conversations".to_string() };
        assert_eq!(err.to_string(), "HTTP 401 from https://x/conversations");

        let err = WatchError::RetriesExhausted { attempts: 10, last: "no anchor".to_string() };
        assert_eq!(err.to_string(), "Gave up after 10 attempts: no anchor");
    }

    #[test]
    fn test_error_from_serde() {
        let bad: std::result::Result<serde_json::Value, _> = serde_json::from_str("{nope");
        let err: WatchError = bad.unwrap_err().into();
        assert!(matches!(err, WatchError::Serialization(_)));
    }
}
