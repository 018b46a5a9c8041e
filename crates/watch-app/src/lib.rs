//! Reply Watch: WASM entry point of the content script.
//!
//! This crate is the composition root: it assembles the browser adapters,
//! restores persisted settings and injects the toggle button.

mod app;

use wasm_bindgen::prelude::*;

/// Runs once when the content script's module is instantiated.
#[wasm_bindgen(start)]
pub fn main() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    log::info!("Reply watch starting...");

    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = app::run().await {
            log::error!("Reply watch failed to start: {}", e);
        }
    });
}
