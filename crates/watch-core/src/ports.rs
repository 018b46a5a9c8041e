//! Port traits: the hexagonal architecture boundary.
//!
//! These traits are defined here in `watch-core` (pure Rust).
//! Implementations live in `watch-platform` (browser adapters).
//! The core never imports platform code; it only depends on these traits.

use std::rc::Rc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use watch_types::Result;

// ─── HTTP Port ───────────────────────────────────────────────

/// Status and body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait(?Send)]
pub trait HttpPort {
    /// `GET url` with `Authorization: Bearer <bearer>`.
    ///
    /// Any response, successful or not, is `Ok`. `Err` means no response
    /// arrived at all.
    async fn get(&self, url: &str, bearer: &str) -> Result<HttpResponse>;
}

// ─── Storage Port ────────────────────────────────────────────

#[async_trait(?Send)]
pub trait StoragePort {
    /// Get a value by key
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Set a value
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete a value
    async fn delete(&self, key: &str) -> Result<()>;

    /// Name of this backend (for logging/debug)
    fn backend_name(&self) -> &str;
}

// ─── Page Port ───────────────────────────────────────────────

/// Click callback registered on a page element
pub type ClickHandler = Rc<dyn Fn()>;

/// The host page's document, reduced to what the watcher reads and writes.
#[async_trait(?Send)]
pub trait PagePort {
    /// Full URL of the current page
    fn location_href(&self) -> String;

    /// Text of the last reply on the page, or `None` while the page has no
    /// reply heading or the reply has no body yet.
    fn last_reply_text(&self) -> Option<String>;

    /// Append a copy of the reply container whose body is `html`.
    fn append_reply(&self, html: &str) -> Result<()>;

    /// Leave the page for `path` (same origin).
    fn navigate_to(&self, path: &str) -> Result<()>;

    /// Resolve `true` once every element id in `ids` is present in the page,
    /// or `false` when `deadline_ms` passes first. Watches at most once.
    async fn wait_for_elements(&self, ids: &[String], deadline_ms: u32) -> bool;

    /// Register `handler` for clicks on the element with `id`.
    fn on_click(&self, id: &str, handler: ClickHandler) -> Result<()>;

    /// `textContent` of the element with `id`
    fn element_text(&self, id: &str) -> Option<String>;

    /// Replace the inner HTML of the element with `id`
    fn set_inner_html(&self, id: &str, html: &str) -> Result<()>;
}

// ─── User Prompt Port ────────────────────────────────────────

pub trait PromptPort {
    /// Blocking notice
    fn alert(&self, message: &str);

    /// Blocking single-line text prompt. `None` when dismissed.
    fn prompt(&self, message: &str) -> Option<String>;
}

// ─── Clipboard Port ──────────────────────────────────────────

#[async_trait(?Send)]
pub trait ClipboardPort {
    async fn write_text(&self, text: &str) -> Result<()>;
}

// ─── Time Ports ──────────────────────────────────────────────

#[async_trait(?Send)]
pub trait TimerPort {
    /// Resolve after `ms` milliseconds
    async fn sleep(&self, ms: u32);
}

pub trait ClockPort {
    fn now(&self) -> DateTime<Utc>;
}
