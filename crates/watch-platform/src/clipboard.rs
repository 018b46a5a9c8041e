//! Async Clipboard API.

use async_trait::async_trait;
use wasm_bindgen_futures::JsFuture;

use watch_core::ports::ClipboardPort;
use watch_types::{Result, WatchError};

#[derive(Default)]
pub struct BrowserClipboard;

#[async_trait(?Send)]
impl ClipboardPort for BrowserClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let window = web_sys::window()
            .ok_or_else(|| WatchError::Clipboard("No window object".to_string()))?;
        let promise = window.navigator().clipboard().write_text(text);
        JsFuture::from(promise)
            .await
            .map_err(|e| WatchError::Clipboard(format!("{:?}", e)))?;
        Ok(())
    }
}
