use std::fmt;
use std::num::NonZeroU32;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;
use tracing::{debug, warn};

/// Tells a request whether anyone still wants its result.  A request is
/// cancelled once the shared generation counter moves past its own
/// generation.
#[derive(Clone, Debug, Default)]
pub(crate) struct Cancellation {
    current: Option<Arc<AtomicU64>>,
    generation: u64,
}

impl Cancellation {
    pub(crate) fn new(current: Arc<AtomicU64>, generation: u64) -> Cancellation {
        Cancellation {
            current: Some(current),
            generation,
        }
    }

    /// A request that is never cancelled
    pub(crate) fn never() -> Cancellation {
        Cancellation::default()
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|c| c.load(Ordering::Acquire) != self.generation)
    }
}

/// Capped exponential backoff: the wait after the `n`th failed attempt is
/// `base_delay * 2^(n-1)`, but never more than `max_delay`
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) struct RetryPolicy {
    pub(crate) max_attempts: NonZeroU32,
    pub(crate) base_delay: Duration,
    pub(crate) max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> RetryPolicy {
        RetryPolicy {
            max_attempts: NonZeroU32::new(3).unwrap_or(NonZeroU32::MIN),
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(5000),
        }
    }
}

impl RetryPolicy {
    /// Returns how long to wait after failed attempt number `attempt`
    /// (counting from 1)
    pub(crate) fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 1u32
            .checked_shl(attempt.saturating_sub(1))
            .unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }

    /// Calls `op` with the attempt number until it succeeds, `max_attempts`
    /// attempts have failed, or `cancel` fires, calling `sleep` between
    /// attempts.  On failure, the error from the last attempt is returned.
    pub(crate) fn run<T, E, F, S>(
        &self,
        cancel: &Cancellation,
        mut op: F,
        mut sleep: S,
    ) -> Result<T, E>
    where
        E: fmt::Display,
        F: FnMut(u32) -> Result<T, E>,
        S: FnMut(Duration),
    {
        let mut attempt = 1;
        loop {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= self.max_attempts.get() => {
                    warn!(attempt, error = %e, "request failed; giving up");
                    return Err(e);
                }
                Err(e) if cancel.is_cancelled() => {
                    debug!(attempt, error = %e, "request superseded; not retrying");
                    return Err(e);
                }
                Err(e) => {
                    let delay = self.delay_after(attempt);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts.get(),
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %e,
                        "request failed; retrying"
                    );
                    sleep(delay);
                    if cancel.is_cancelled() {
                        debug!(attempt, "request superseded while waiting to retry");
                        return Err(e);
                    }
                    attempt += 1;
                }
            }
        }
    }
}
