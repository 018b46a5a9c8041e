//! Conversation navigator: waits for a freshly created conversation other
//! than the one open and moves the page to it.

use std::rc::Rc;

use crate::context::WatchContext;
use crate::periodic::PeriodicTask;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigatorOutcome {
    /// The backend could not be asked
    Unavailable,
    /// Latest conversation is the open one, or older than a minute
    NothingNew,
    /// Listening was switched off while the check was in flight
    NotListening,
    /// The page was sent to this conversation
    Navigated(String),
}

pub struct ConversationNavigator {
    ctx: Rc<WatchContext>,
    task: Rc<PeriodicTask>,
}

impl ConversationNavigator {
    pub fn new(ctx: Rc<WatchContext>) -> Self {
        let task = Rc::new(PeriodicTask::new(
            "conversation navigator",
            ctx.config.poll_interval_ms,
        ));
        Self { ctx, task }
    }

    pub fn start(&self) -> bool {
        let ctx = self.ctx.clone();
        let task = Rc::downgrade(&self.task);
        self.task.start(
            self.ctx.platform.spawner.as_ref(),
            self.ctx.platform.timer.clone(),
            move || {
                let ctx = ctx.clone();
                let task = task.clone();
                async move {
                    if let NavigatorOutcome::Navigated(_) = check_once(&ctx).await {
                        // The page is leaving; nothing left to poll for.
                        if let Some(task) = task.upgrade() {
                            task.stop();
                        }
                    }
                }
            },
        )
    }

    pub fn stop(&self) -> bool {
        self.task.stop()
    }

    pub fn is_polling(&self) -> bool {
        self.task.is_running()
    }

    pub async fn check_once(&self) -> NavigatorOutcome {
        let outcome = check_once(&self.ctx).await;
        if let NavigatorOutcome::Navigated(_) = outcome {
            self.task.stop();
        }
        outcome
    }
}

/// Look once for a conversation created under a minute ago that is not the
/// open one; lock onto it and navigate there when found and still listening.
pub async fn check_once(ctx: &WatchContext) -> NavigatorOutcome {
    log::debug!("Checking for newly created conversations");
    let current = ctx.current_conversation_id();
    let Some(latest) = ctx.fetcher.recent_conversation().await else {
        return NavigatorOutcome::Unavailable;
    };

    if !latest.is_fresh() || current.as_deref() == Some(latest.id.as_str()) {
        return NavigatorOutcome::NothingNew;
    }
    if !ctx.is_listening() {
        log::debug!("Listening switched off, staying on the page");
        return NavigatorOutcome::NotListening;
    }

    ctx.set_locked_to_latest(true).await;
    let path = format!("/c/{}", latest.id);
    log::info!("Navigating to new conversation {}", latest.id);
    if let Err(e) = ctx.platform.page.navigate_to(&path) {
        log::warn!("Navigation to {} failed: {}", path, e);
        return NavigatorOutcome::Unavailable;
    }
    NavigatorOutcome::Navigated(latest.id)
}
