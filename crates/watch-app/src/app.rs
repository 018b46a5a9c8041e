//! Startup sequence.
//!
//! 1. Pick a settings backend and build the context
//! 2. Restore the credential and the "locked to latest" flag
//! 3. Ask for a credential when none is stored
//! 4. Resume watching when the open conversation is the latest
//! 5. Inject the toggle button, retrying while the composer renders

use std::rc::Rc;

use watch_core::retry::retry_with_policy;
use watch_core::{ToggleOutcome, WatchContext, WatchToggle};
use watch_platform::storage::auto_detect_storage;
use watch_platform::{browser_platform, inject_toggle_button, ToggleClick, ToggleIcon};
use watch_types::config::WatchConfig;
use watch_types::Result;

pub async fn run() -> Result<()> {
    let config = WatchConfig::default();
    let storage = auto_detect_storage().await;
    let platform = browser_platform(&config, storage);
    let ctx = WatchContext::new(config, platform);

    let settings = ctx.settings.load().await;
    ctx.credential.restore(settings.auth_token);
    ctx.restore_locked_to_latest(settings.on_latest_conversation);

    if ctx.credential.is_missing() {
        log::info!("No credential stored, asking for one");
        ctx.credential.request_new().await;
    }

    let toggle = Rc::new(WatchToggle::new(ctx.clone()));
    if toggle.resume().await {
        log::info!("Resumed listening on the latest conversation");
    }

    let on_click = toggle_click(toggle.clone());
    let selectors = ctx.config.selectors.clone();
    let listening = toggle.is_listening();
    let injected = retry_with_policy(ctx.config.attach_retry, ctx.platform.timer.as_ref(), |attempt| {
        let on_click = on_click.clone();
        let selectors = selectors.clone();
        async move {
            if attempt > 1 {
                log::debug!("Retrying toggle button injection ({})", attempt);
            }
            inject_toggle_button(&selectors, listening, on_click)
        }
    })
    .await;

    // The toggle owns both loops and must outlive this function.
    std::mem::forget(toggle);
    injected.map(|_| ())
}

fn toggle_click(toggle: Rc<WatchToggle>) -> ToggleClick {
    Rc::new(move |icon: ToggleIcon| {
        let toggle = toggle.clone();
        wasm_bindgen_futures::spawn_local(async move {
            icon.show(!toggle.is_listening());
            let outcome = toggle.toggle().await;
            if outcome == ToggleOutcome::LatestUnknown {
                log::warn!("Could not determine the latest conversation; listening stays off");
            }
            icon.show(toggle.is_listening());
        });
    })
}
