//! Generic wait-until polling loop.
//!
//! [`wait_until`] repeatedly invokes a synchronous predicate until it
//! produces a value, following the fixed backoff schedule in
//! [`crate::backoff`]. Attempts never overlap: each one runs strictly
//! after the previous attempt's delay has elapsed and its predicate call
//! has returned. The very first attempt is deferred by one scheduling
//! tick so asynchronous work enqueued immediately before the wait gets a
//! chance to run before the first check.

use crate::backoff::delay_for_attempt;
use crate::error::{BoxError, WaitError};
use std::time::Duration;
use tracing::{debug, trace};

/// Default timeout applied when none is configured explicitly.
const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Default message for the timeout failure.
const DEFAULT_TIMEOUT_MESSAGE: &str = "wait_until timed out";

/// Options for a [`wait_until`] operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOptions {
    /// Maximum accumulated backoff delay before the wait fails.
    /// `None` disables the timeout entirely: the wait can then only end
    /// through the predicate.
    pub timeout: Option<Duration>,
    /// Message used to construct the timeout failure.
    pub timeout_message: String,
}

impl WaitOptions {
    /// Replace the timeout bound.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Disable the timeout: wait indefinitely for the predicate.
    ///
    /// Callers are expected to impose their own outer bound; this is the
    /// deliberate policy of the settled wait, where failing closed is
    /// worse than waiting.
    pub fn no_timeout(mut self) -> Self {
        self.timeout = None;
        self
    }

    /// Replace the timeout failure message.
    pub fn with_timeout_message(mut self, message: impl Into<String>) -> Self {
        self.timeout_message = message.into();
        self
    }
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            timeout_message: DEFAULT_TIMEOUT_MESSAGE.to_string(),
        }
    }
}

/// Poll `check` until it returns `Some`, resolving with that value.
///
/// Fails with [`WaitError::TimedOut`] once the accumulated scheduled
/// delay reaches `options.timeout`. Elapsed time sums the nominal
/// backoff delays, not drift-corrected wall-clock time.
pub async fn wait_until<T, F>(mut check: F, options: WaitOptions) -> Result<T, WaitError>
where
    F: FnMut() -> Option<T>,
{
    try_wait_until(move || Ok::<_, std::convert::Infallible>(check()), options).await
}

/// Poll a fallible predicate until it produces a value.
///
/// A predicate error ends the wait immediately - no retry - and is
/// passed through to the caller unwrapped as [`WaitError::Predicate`].
pub async fn try_wait_until<T, E, F>(mut check: F, options: WaitOptions) -> Result<T, WaitError>
where
    F: FnMut() -> Result<Option<T>, E>,
    E: Into<BoxError>,
{
    let WaitOptions {
        timeout,
        timeout_message,
    } = options;

    // Built before the first attempt so the message reflects the call
    // site configuration, not the state at timeout fire.
    let timed_out = WaitError::timed_out(timeout_message);

    let mut elapsed = Duration::ZERO;
    let mut attempt: u32 = 0;

    loop {
        let delay = delay_for_attempt(attempt);
        if delay.is_zero() {
            // Attempt 0: one minimal scheduling tick, never the caller's
            // own stack frame.
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(delay).await;
        }
        elapsed += delay;

        match check() {
            Err(err) => return Err(WaitError::Predicate(err.into())),
            Ok(Some(value)) => {
                trace!(attempt, elapsed_ms = elapsed.as_millis() as u64, "wait resolved");
                return Ok(value);
            }
            Ok(None) => {
                if let Some(limit) = timeout {
                    if elapsed >= limit {
                        debug!(
                            attempt,
                            elapsed_ms = elapsed.as_millis() as u64,
                            limit_ms = limit.as_millis() as u64,
                            "wait timed out"
                        );
                        return Err(timed_out);
                    }
                }
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[derive(Debug, thiserror::Error)]
    #[error("predicate refused")]
    struct RefusedError;

    #[tokio::test(start_paused = true)]
    async fn resolves_with_first_truthy_value() {
        let value = wait_until(|| Some(42), WaitOptions::default())
            .await
            .unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test(start_paused = true)]
    async fn first_attempt_consumes_no_scheduled_delay() {
        let start = tokio::time::Instant::now();
        wait_until(|| Some(()), WaitOptions::default())
            .await
            .unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn first_attempt_is_deferred_to_the_next_tick() {
        use futures::FutureExt;

        // Even an immediately-truthy predicate is not checked inside a
        // single synchronous poll of the future.
        let wait = wait_until(|| Some(1), WaitOptions::default());
        assert!(wait.now_or_never().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn predicate_error_stops_the_wait_without_retry() {
        let calls = Arc::new(AtomicU32::new(0));
        let counted = calls.clone();

        let result: Result<(), WaitError> = try_wait_until(
            move || {
                counted.fetch_add(1, Ordering::SeqCst);
                Err(RefusedError)
            },
            WaitOptions::default(),
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        match err {
            WaitError::Predicate(inner) => {
                assert!(inner.downcast_ref::<RefusedError>().is_some());
            }
            other => panic!("expected predicate failure, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn elapsed_delay_follows_the_schedule() {
        // Falsy for six attempts, truthy on the seventh: the six failed
        // checks follow delays 0+1+2+5+7+10 and the resolving check
        // follows one more saturated 10ms delay, 35ms in total.
        let calls = Arc::new(AtomicU32::new(0));
        let counted = calls.clone();
        let start = tokio::time::Instant::now();

        wait_until(
            move || (counted.fetch_add(1, Ordering::SeqCst) + 1 > 6).then_some(()),
            WaitOptions::default(),
        )
        .await
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 7);
        assert_eq!(start.elapsed(), Duration::from_millis(35));
    }

    #[tokio::test(start_paused = true)]
    async fn times_out_once_accumulated_delay_reaches_the_limit() {
        let calls = Arc::new(AtomicU32::new(0));
        let counted = calls.clone();

        let err = wait_until(
            move || {
                counted.fetch_add(1, Ordering::SeqCst);
                None::<()>
            },
            WaitOptions::default()
                .with_timeout(Duration::from_millis(25))
                .with_timeout_message("gave up"),
        )
        .await
        .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(err.to_string(), "gave up");
        // Cumulative delay hits 25ms after the sixth attempt.
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_timeout_never_trips() {
        let wait = wait_until(|| None::<()>, WaitOptions::default().no_timeout());

        let bounded = tokio::time::timeout(Duration::from_secs(5), wait).await;
        assert!(bounded.is_err(), "indefinite wait must still be pending");
    }
}
