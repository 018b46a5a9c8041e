//! Reply watcher core: everything that decides, nothing that touches the
//! browser. Adapters for the ports in [`ports`] live in `watch-platform`.

pub mod context;
pub mod copy;
pub mod credential;
pub mod detector;
pub mod fetcher;
pub mod highlight;
pub mod navigator;
pub mod periodic;
pub mod ports;
pub mod render;
pub mod retry;
pub mod sanitize;
pub mod settings;
pub mod toggle;


pub use context::{Platform, WatchContext};
pub use detector::{ChangeDetector, CycleOutcome};
pub use navigator::{ConversationNavigator, NavigatorOutcome};
pub use render::{render_markdown, RenderedReply};
pub use sanitize::{sanitize, SanitizedKey};
pub use toggle::{ToggleOutcome, WatchToggle};
