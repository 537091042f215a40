//! Fixed escalating backoff schedule for the poller.
//!
//! The schedule front-loads cheap re-checks (most waits settle within a
//! few milliseconds) and then saturates at a constant tail so a long
//! wait keeps polling at a steady cadence. It is never reset mid-wait.

use std::time::Duration;

/// Delays for the first attempts, in milliseconds.
const INITIAL_DELAYS_MS: [u64; 5] = [0, 1, 2, 5, 7];

/// Constant delay for every attempt past the initial ramp.
const SATURATED_DELAY_MS: u64 = 10;

/// The delay scheduled before attempt `attempt` (zero-based).
///
/// Attempt 0 gets a zero delay - the poller still defers it by one
/// scheduling tick so work enqueued just before the wait runs first.
pub fn delay_for_attempt(attempt: u32) -> Duration {
    let ms = INITIAL_DELAYS_MS
        .get(attempt as usize)
        .copied()
        .unwrap_or(SATURATED_DELAY_MS);
    Duration::from_millis(ms)
}
