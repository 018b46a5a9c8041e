//! Cancellable periodic task.
//!
//! One loop per task: sleep for the interval, then run the tick to
//! completion before sleeping again, so ticks of the same task never
//! overlap. `stop` marks the running loop cancelled; a tick already in
//! flight finishes, but no tick starts after the next interval boundary.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::task::{LocalSpawn, LocalSpawnExt};

use crate::ports::TimerPort;

pub struct PeriodicTask {
    name: &'static str,
    interval_ms: u32,
    cancel_flag: RefCell<Option<Rc<Cell<bool>>>>,
}

impl PeriodicTask {
    pub fn new(name: &'static str, interval_ms: u32) -> Self {
        Self {
            name,
            interval_ms,
            cancel_flag: RefCell::new(None),
        }
    }

    pub fn is_running(&self) -> bool {
        self.cancel_flag.borrow().is_some()
    }

    /// Start the loop. Returns `false` without doing anything when the task
    /// is already running or could not be spawned.
    pub fn start<F, Fut>(&self, spawner: &dyn LocalSpawn, timer: Rc<dyn TimerPort>, mut tick: F) -> bool
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        if self.is_running() {
            log::debug!("{} already running", self.name);
            return false;
        }

        let cancelled = Rc::new(Cell::new(false));
        let flag = cancelled.clone();
        let interval = self.interval_ms;
        let name = self.name;
        let looped = async move {
            loop {
                timer.sleep(interval).await;
                if flag.get() {
                    break;
                }
                tick().await;
            }
            log::debug!("{} loop exited", name);
        };

        match spawner.spawn_local(looped) {
            Ok(()) => {
                *self.cancel_flag.borrow_mut() = Some(cancelled);
                log::info!("{} started ({}ms)", self.name, self.interval_ms);
                true
            }
            Err(e) => {
                log::error!("Failed to spawn {}: {}", self.name, e);
                false
            }
        }
    }

    /// Cancel the running loop. Returns whether one was running.
    pub fn stop(&self) -> bool {
        match self.cancel_flag.borrow_mut().take() {
            Some(flag) => {
                flag.set(true);
                log::info!("{} stopped", self.name);
                true
            }
            None => false,
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        self.stop();
    }
}
