//! Bounded retry for operations against host-page markup that may not be
//! rendered yet.

use std::future::Future;

use watch_types::{config::RetryPolicy, Result, WatchError};

use crate::ports::TimerPort;

/// Run `op` until it succeeds or `policy.max_attempts` attempts have
/// failed, sleeping `policy.delay_ms` between attempts.
pub async fn retry_with_policy<T, F, Fut>(policy: RetryPolicy, timer: &dyn TimerPort, mut op: F) -> Result<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last = WatchError::Other("no attempts made".to_string());
    for attempt in 1..=policy.max_attempts {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                log::debug!("Attempt {}/{} failed: {}", attempt, policy.max_attempts, e);
                last = e;
            }
        }
        if attempt < policy.max_attempts {
            timer.sleep(policy.delay_ms).await;
        }
    }
    Err(WatchError::RetriesExhausted {
        attempts: policy.max_attempts,
        last: last.to_string(),
    })
}
