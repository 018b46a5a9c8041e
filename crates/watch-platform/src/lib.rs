//! Browser adapters for the watch-core ports.
//!
//! Everything here assumes a `window` and a ChatGPT document; none of it
//! is needed to test the core.

pub mod clipboard;
pub mod http;
pub mod page;
pub mod prompt;
pub mod spawn;
pub mod storage;
pub mod timer;
pub mod toggle_button;

use std::rc::Rc;

use watch_core::context::Platform;
use watch_core::ports::StoragePort;
use watch_types::config::WatchConfig;

pub use clipboard::BrowserClipboard;
pub use http::GlooHttp;
pub use page::DomPage;
pub use prompt::BrowserPrompt;
pub use spawn::BrowserSpawner;
pub use timer::{BrowserClock, BrowserTimer};
pub use toggle_button::{inject_toggle_button, ToggleClick, ToggleIcon};

/// Wire every browser adapter around the chosen settings backend.
pub fn browser_platform(config: &WatchConfig, storage: Rc<dyn StoragePort>) -> Platform {
    Platform {
        http: Rc::new(GlooHttp::new()),
        storage,
        page: Rc::new(DomPage::new(config.selectors.clone())),
        prompt: Rc::new(BrowserPrompt),
        clipboard: Rc::new(BrowserClipboard),
        timer: Rc::new(BrowserTimer),
        clock: Rc::new(BrowserClock),
        spawner: Rc::new(BrowserSpawner),
    }
}
