//! Watch toggle: the user-facing on/off switch.
//!
//! Which loop a switch-on starts depends on the page:
//! - no conversation open: poll for a new conversation (navigator)
//! - a conversation open but not known to be the latest: check once; if it
//!   is not the latest, behave as above
//! - the latest conversation open: poll it for new replies (detector)
//!
//! Switching off stops both loops. At most one loop runs at a time.
//!
//! Every click bumps a generation counter. A click whose awaits outlive a
//! later click is superseded: it returns without starting anything, so only
//! the most recent click decides which loop runs.

use std::cell::Cell;
use std::rc::Rc;

use crate::context::WatchContext;
use crate::detector::ChangeDetector;
use crate::navigator::{ConversationNavigator, NavigatorOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Listening switched off; no loop is running
    Stopped,
    /// Waiting for a new conversation to appear
    NavigatorStarted,
    /// The first navigator check already found one and left the page
    Navigated(String),
    /// Polling the open conversation for replies
    DetectorStarted,
    /// The latest conversation could not be determined; listening is off
    LatestUnknown,
    /// A later click took over while this one was waiting
    Superseded,
}

pub struct WatchToggle {
    ctx: Rc<WatchContext>,
    detector: ChangeDetector,
    navigator: ConversationNavigator,
    generation: Cell<u64>,
}

impl WatchToggle {
    pub fn new(ctx: Rc<WatchContext>) -> Self {
        Self {
            detector: ChangeDetector::new(ctx.clone()),
            navigator: ConversationNavigator::new(ctx.clone()),
            ctx,
            generation: Cell::new(0),
        }
    }

    pub fn is_listening(&self) -> bool {
        self.ctx.is_listening()
    }

    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    pub fn navigator(&self) -> &ConversationNavigator {
        &self.navigator
    }

    /// Flip listening and wire up the matching loop.
    pub async fn toggle(&self) -> ToggleOutcome {
        let click = self.generation.get() + 1;
        self.generation.set(click);

        let listening = !self.ctx.is_listening();
        self.ctx.set_listening(listening);
        log::info!("Toggling listening: {}", listening);

        let current = self.ctx.current_conversation_id();

        if !listening {
            self.stop_all();
            if current.is_none() {
                self.ctx.set_locked_to_latest(false).await;
            }
            return ToggleOutcome::Stopped;
        }

        let Some(current) = current else {
            self.ctx.set_locked_to_latest(false).await;
            if self.superseded(click) {
                return ToggleOutcome::Superseded;
            }
            return self.watch_for_new_conversation(click).await;
        };

        if !self.ctx.is_locked_to_latest() {
            let latest = self.ctx.fetcher.recent_conversation().await;
            if self.superseded(click) {
                return ToggleOutcome::Superseded;
            }
            let Some(latest) = latest else {
                self.ctx.set_listening(false);
                return ToggleOutcome::LatestUnknown;
            };
            if latest.id != current {
                self.ctx.set_locked_to_latest(false).await;
                if self.superseded(click) {
                    return ToggleOutcome::Superseded;
                }
                return self.watch_for_new_conversation(click).await;
            }
            self.ctx.set_locked_to_latest(true).await;
            if self.superseded(click) {
                return ToggleOutcome::Superseded;
            }
        }

        self.watch_open_conversation(click).await
    }

    /// Startup: when the open conversation is the latest one, start
    /// listening right away. Returns whether the detector was started.
    pub async fn resume(&self) -> bool {
        let Some(current) = self.ctx.current_conversation_id() else {
            return false;
        };
        let click = self.generation.get();
        let latest = self.ctx.fetcher.recent_conversation().await;
        if self.superseded(click) {
            return false;
        }
        let Some(latest) = latest else {
            return false;
        };
        if latest.id != current {
            log::debug!("Open conversation {} is not the latest ({})", current, latest.id);
            // A lock left over from an earlier page view no longer holds.
            if self.ctx.is_locked_to_latest() {
                self.ctx.set_locked_to_latest(false).await;
            }
            return false;
        }

        self.ctx.set_listening(true);
        self.ctx.set_locked_to_latest(true).await;
        if self.superseded(click) {
            return false;
        }
        self.watch_open_conversation(click).await == ToggleOutcome::DetectorStarted
    }

    /// Stop whichever loop is running.
    pub fn stop_all(&self) {
        self.detector.stop();
        self.navigator.stop();
    }

    /// Whether a click after `click` has happened
    fn superseded(&self, click: u64) -> bool {
        let stale = self.generation.get() != click;
        if stale {
            log::debug!("Toggle click {} superseded", click);
        }
        stale
    }

    async fn watch_for_new_conversation(&self, click: u64) -> ToggleOutcome {
        self.detector.stop();
        let outcome = self.navigator.check_once().await;
        if self.superseded(click) {
            return ToggleOutcome::Superseded;
        }
        if let NavigatorOutcome::Navigated(id) = outcome {
            return ToggleOutcome::Navigated(id);
        }
        self.navigator.start();
        ToggleOutcome::NavigatorStarted
    }

    async fn watch_open_conversation(&self, click: u64) -> ToggleOutcome {
        self.navigator.stop();
        self.detector.run_cycle().await;
        if self.superseded(click) {
            return ToggleOutcome::Superseded;
        }
        self.detector.start();
        ToggleOutcome::DetectorStarted
    }
}

/// Glyph shown on the toggle button
pub fn listening_icon(listening: bool) -> &'static str {
    if listening {
        "🔊"
    } else {
        "🔇"
    }
}
