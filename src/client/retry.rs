// Retry policy for client fetches.
// Fixed number of attempts with a fixed delay, abandoned when the caller stops caring.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Default number of attempts per fetch.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default pause between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// How a retried operation ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RetryOutcome<T, E> {
    Succeeded(T),
    /// Every attempt failed; carries the last error.
    Exhausted(E),
    /// The caller went inactive before an attempt could start.
    Abandoned,
}

/// Bounded retries with a fixed delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `operation` until it succeeds, attempts run out, or `is_active` turns false.
    ///
    /// `is_active` is checked before every attempt. No delay follows the final attempt.
    pub async fn run<T, E, F, Fut>(
        &self,
        is_active: impl Fn() -> bool,
        mut operation: F,
    ) -> RetryOutcome<T, E>
    where
        E: Display,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            if !is_active() {
                return RetryOutcome::Abandoned;
            }

            match operation(attempt).await {
                Ok(value) => return RetryOutcome::Succeeded(value),
                Err(e) => {
                    warn!(attempt, max_attempts = attempts, error = %e, "fetch attempt failed");
                    last_error = Some(e);
                }
            }

            if attempt < attempts {
                tokio::time::sleep(self.delay).await;
            }
        }

        match last_error {
            Some(e) => RetryOutcome::Exhausted(e),
            None => RetryOutcome::Abandoned,
        }
    }
}
