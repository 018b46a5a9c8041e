//! Copy-to-clipboard behaviour for rendered code panels.
//!
//! A panel's button and code element only exist once the rendered reply
//! has been spliced into the page. Each control therefore waits once, with
//! a deadline, for both elements to appear before its click handler is
//! attached.

use std::rc::{Rc, Weak};

use futures::task::LocalSpawnExt;
use watch_types::{Result, WatchError};

use crate::context::WatchContext;
use crate::ports::ClickHandler;
use crate::render::{copy_button_label, CopyControl, COPIED_LABEL, COPY_LABEL};

/// Spawn one one-shot watcher per control.
pub fn arm_copy_controls(ctx: &Rc<WatchContext>, controls: &[CopyControl]) {
    for control in controls {
        let watcher = arm(ctx.clone(), control.clone());
        if let Err(e) = ctx.platform.spawner.spawn_local(watcher) {
            log::warn!("Could not watch for copy control {}: {}", control.button_id, e);
        }
    }
}

async fn arm(ctx: Rc<WatchContext>, control: CopyControl) {
    let ids = [control.button_id.clone(), control.code_id.clone()];
    let present = ctx
        .platform
        .page
        .wait_for_elements(&ids, ctx.config.copy_watch_deadline_ms)
        .await;
    if !present {
        log::debug!("Copy control {} never appeared", control.button_id);
        return;
    }

    let handler = click_handler(Rc::downgrade(&ctx), control.clone());
    match ctx.platform.page.on_click(&control.button_id, handler) {
        Ok(()) => log::debug!("Copy control {} armed", control.button_id),
        Err(e) => log::warn!("Failed to arm copy control {}: {}", control.button_id, e),
    }
}

fn click_handler(ctx: Weak<WatchContext>, control: CopyControl) -> ClickHandler {
    Rc::new(move || {
        let Some(ctx) = ctx.upgrade() else {
            return;
        };
        let task_ctx = ctx.clone();
        let control = control.clone();
        let task = async move {
            if let Err(e) = copy_code(&task_ctx, &control).await {
                log::warn!("Copy from {} failed: {}", control.code_id, e);
            }
        };
        if let Err(e) = ctx.platform.spawner.spawn_local(task) {
            log::warn!("Could not run copy handler: {}", e);
        }
    })
}

/// Copy the panel's code text, acknowledge on the button, then restore the
/// label after `copy_ack_ms`.
pub async fn copy_code(ctx: &WatchContext, control: &CopyControl) -> Result<()> {
    let page = &ctx.platform.page;
    let text = page
        .element_text(&control.code_id)
        .ok_or_else(|| WatchError::PageElement(control.code_id.clone()))?;
    log::debug!("Copying code from element {}", control.index);

    ctx.platform.clipboard.write_text(&text).await?;
    page.set_inner_html(&control.button_id, &copy_button_label(COPIED_LABEL))?;
    ctx.platform.timer.sleep(ctx.config.copy_ack_ms).await;
    page.set_inner_html(&control.button_id, &copy_button_label(COPY_LABEL))?;
    Ok(())
}
