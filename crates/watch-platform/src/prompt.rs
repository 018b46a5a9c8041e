//! Blocking `alert()` / `prompt()` dialogs.

use watch_core::ports::PromptPort;

#[derive(Default)]
pub struct BrowserPrompt;

impl PromptPort for BrowserPrompt {
    fn alert(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            log::warn!("alert() failed: {:?}", e);
        }
    }

    fn prompt(&self, message: &str) -> Option<String> {
        let window = web_sys::window()?;
        match window.prompt_with_message(message) {
            Ok(answer) => answer,
            Err(e) => {
                log::warn!("prompt() failed: {:?}", e);
                None
            }
        }
    }
}
