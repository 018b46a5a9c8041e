//! Conversation data as the backend API returns it, and the trimmed views
//! the watcher actually works with.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The most recently updated conversation, as seen at one poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub age_minutes: i64,
}

impl ConversationSummary {
    /// Build a summary relative to `now`. Age is floored to whole minutes.
    pub fn at(id: impl Into<String>, created_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let age_minutes = (now - created_at).num_milliseconds().div_euclid(60_000);
        Self {
            id: id.into(),
            created_at,
            age_minutes,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.age_minutes < 1
    }
}

/// Author role of a transcript node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Assistant,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptNode {
    pub id: String,
    pub role: Role,
    pub text: Option<String>,
}

/// Ordered view over a conversation's message tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationTranscript {
    pub nodes: Vec<TranscriptNode>,
}

impl ConversationTranscript {
    /// Text of the last assistant-authored node in mapping order.
    ///
    /// A trailing assistant node without extractable text yields `None`;
    /// earlier assistant nodes are not consulted.
    pub fn last_assistant_text(&self) -> Option<&str> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.role == Role::Assistant)
            .and_then(|n| n.text.as_deref())
    }
}

impl From<ConversationDetail> for ConversationTranscript {
    fn from(detail: ConversationDetail) -> Self {
        let nodes = detail
            .mapping
            .0
            .into_iter()
            .filter_map(|(id, node)| {
                let message = node.message?;
                Some(TranscriptNode {
                    id,
                    role: message.author.role,
                    text: message.content.and_then(|c| c.first_part_text()),
                })
            })
            .collect();
        Self { nodes }
    }
}

// ─── Wire types ──────────────────────────────────────────────

/// Body of `GET /conversations`
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationPage {
    #[serde(default)]
    pub items: Vec<ConversationItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationItem {
    pub id: String,
    pub create_time: Timestamp,
}

/// Timestamps arrive either as RFC 3339 strings or as epoch seconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Text(String),
    Epoch(f64),
}

impl Timestamp {
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        match self {
            Timestamp::Text(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            Timestamp::Epoch(secs) => {
                let millis = (secs * 1000.0).round() as i64;
                Utc.timestamp_millis_opt(millis).single()
            }
        }
    }
}

/// Body of `GET /conversation/{id}`
#[derive(Debug, Clone, Deserialize)]
pub struct ConversationDetail {
    pub mapping: OrderedMapping,
}

/// The `mapping` object, decoded with its key order intact.
#[derive(Debug, Clone, Default)]
pub struct OrderedMapping(pub Vec<(String, MappingNode)>);

impl<'de> Deserialize<'de> for OrderedMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = OrderedMapping;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object of transcript nodes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, MappingNode>()? {
                    entries.push((key, value));
                }
                Ok(OrderedMapping(entries))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(OrderedMapping::default())
            }
        }

        deserializer.deserialize_any(OrderedVisitor)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MappingNode {
    #[serde(default)]
    pub message: Option<NodeMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeMessage {
    pub author: Author,
    #[serde(default)]
    pub content: Option<NodeContent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Author {
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeContent {
    #[serde(default)]
    pub parts: Vec<Value>,
}

impl NodeContent {
    /// `parts[0].text` when present and non-empty, else `parts[0]` as a string.
    pub fn first_part_text(&self) -> Option<String> {
        let first = self.parts.first()?;
        first
            .get("text")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .or_else(|| first.as_str())
            .map(str::to_string)
    }
}
