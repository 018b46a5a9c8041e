//! Timer and clock adapters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gloo_timers::future::TimeoutFuture;

use watch_core::ports::{ClockPort, TimerPort};

#[derive(Default)]
pub struct BrowserTimer;

#[async_trait(?Send)]
impl TimerPort for BrowserTimer {
    async fn sleep(&self, ms: u32) {
        TimeoutFuture::new(ms).await;
    }
}

/// Wall clock; chrono reads `Date.now()` on wasm32.
#[derive(Default)]
pub struct BrowserClock;

impl ClockPort for BrowserClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
