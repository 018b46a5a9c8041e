//! Change detector: decides whether the open conversation received a reply
//! the page does not show yet.
//!
//! Each detection cycle:
//! 1. Read the last reply on the page (abort quietly if not rendered yet)
//! 2. Fetch the last assistant reply from the backend
//! 3. Compare both by sanitized key
//! 4. On a difference, remember the backend text, render it and splice it
//!    into the page
//!
//! Equality is on sanitized keys only, so replies differing just in
//! punctuation, whitespace or stripped decorations count as the same.

use std::rc::Rc;

use crate::context::WatchContext;
use crate::copy::arm_copy_controls;
use crate::periodic::PeriodicTask;
use crate::render::render_markdown;
use crate::sanitize::sanitize;

/// Result of one detection cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// No reply heading or reply body on the page yet
    PageNotReady,
    /// The page URL names no conversation
    NoConversation,
    /// The backend gave no reply text this time
    RemoteUnavailable,
    /// Page and backend agree
    Unchanged,
    /// A new reply was rendered and appended
    Rendered { code_blocks: usize },
    /// A new reply was detected but the page offered nowhere to put it
    InsertFailed(String),
}

pub struct ChangeDetector {
    ctx: Rc<WatchContext>,
    task: PeriodicTask,
}

impl ChangeDetector {
    pub fn new(ctx: Rc<WatchContext>) -> Self {
        let task = PeriodicTask::new("change detector", ctx.config.poll_interval_ms);
        Self { ctx, task }
    }

    /// `Idle -> Polling`
    pub fn start(&self) -> bool {
        let ctx = self.ctx.clone();
        self.task.start(
            self.ctx.platform.spawner.as_ref(),
            self.ctx.platform.timer.clone(),
            move || {
                let ctx = ctx.clone();
                async move {
                    let outcome = run_cycle(&ctx).await;
                    log::debug!("Detection cycle: {:?}", outcome);
                }
            },
        )
    }

    /// `Polling -> Idle`
    pub fn stop(&self) -> bool {
        self.task.stop()
    }

    pub fn is_polling(&self) -> bool {
        self.task.is_running()
    }

    pub async fn run_cycle(&self) -> CycleOutcome {
        run_cycle(&self.ctx).await
    }
}

/// One detection cycle. Without a change it has no side effects.
pub async fn run_cycle(ctx: &Rc<WatchContext>) -> CycleOutcome {
    let Some(on_page) = ctx.platform.page.last_reply_text() else {
        log::debug!("Could not find last message content");
        return CycleOutcome::PageNotReady;
    };

    let Some(conversation_id) = ctx.current_conversation_id() else {
        return CycleOutcome::NoConversation;
    };

    let Some(remote) = ctx
        .fetcher
        .last_assistant_message(Some(&conversation_id))
        .await
    else {
        log::debug!("Could not retrieve new message");
        return CycleOutcome::RemoteUnavailable;
    };

    let remote_key = sanitize(&remote);
    let page_key = sanitize(&on_page);
    if remote_key == page_key {
        return CycleOutcome::Unchanged;
    }

    log::info!("New reply in conversation {}", conversation_id);
    ctx.set_last_seen_message(remote.clone());
    render_and_insert(ctx, &remote)
}

fn render_and_insert(ctx: &Rc<WatchContext>, text: &str) -> CycleOutcome {
    let rendered = render_markdown(text, ctx.next_block_index());
    ctx.consume_block_indices(rendered.copy_controls.len());

    if let Err(e) = ctx.platform.page.append_reply(&rendered.html) {
        log::warn!("No chat container found: {}", e);
        return CycleOutcome::InsertFailed(e.to_string());
    }
    arm_copy_controls(ctx, &rendered.copy_controls);
    CycleOutcome::Rendered {
        code_blocks: rendered.copy_controls.len(),
    }
}
