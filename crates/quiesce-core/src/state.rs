//! Settledness snapshot record.

use crate::probes::{RequestProbe, SchedulerProbe, WaiterProbe};
use serde::{Deserialize, Serialize};

/// A point-in-time snapshot of the activity metrics that determine
/// settledness.
///
/// Snapshots are recomputed on demand and never cached across poll
/// ticks: each one is an independently truthful reading of the probes at
/// the moment [`SettledState::sample`] ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettledState {
    /// Scheduled-but-unfired timer callbacks exist.
    pub has_pending_timers: bool,
    /// A run-loop processing cycle is currently open.
    pub has_run_loop: bool,
    /// At least one registered waiter is still pending.
    pub has_pending_waiters: bool,
    /// At least one tracked request is in flight.
    pub has_pending_requests: bool,
    /// The count of in-flight requests backing `has_pending_requests`.
    pub pending_request_count: usize,
}

impl SettledState {
    /// Take a fresh snapshot from the given probes.
    pub fn sample(
        scheduler: &dyn SchedulerProbe,
        requests: &dyn RequestProbe,
        waiters: &dyn WaiterProbe,
    ) -> Self {
        let pending_request_count = requests.pending_request_count();

        Self {
            has_pending_timers: scheduler.has_pending_timers(),
            has_run_loop: scheduler.has_open_run_loop(),
            has_pending_waiters: waiters.has_pending_waiters(),
            has_pending_requests: pending_request_count > 0,
            pending_request_count,
        }
    }

    /// True iff every activity flag in this snapshot is clear.
    pub fn is_settled(&self) -> bool {
        !(self.has_pending_timers
            || self.has_run_loop
            || self.has_pending_requests
            || self.has_pending_waiters)
    }

    /// A snapshot with every metric clear, mostly useful in tests.
    pub fn settled() -> Self {
        Self {
            has_pending_timers: false,
            has_run_loop: false,
            has_pending_waiters: false,
            has_pending_requests: false,
            pending_request_count: 0,
        }
    }
}

impl Default for SettledState {
    fn default() -> Self {
        Self::settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(f: impl FnOnce(&mut SettledState)) -> SettledState {
        let mut state = SettledState::settled();
        f(&mut state);
        state
    }

    #[test]
    fn all_clear_is_settled() {
        assert!(SettledState::settled().is_settled());
    }

    #[test]
    fn any_single_flag_blocks_settledness() {
        assert!(!with(|s| s.has_pending_timers = true).is_settled());
        assert!(!with(|s| s.has_run_loop = true).is_settled());
        assert!(!with(|s| s.has_pending_waiters = true).is_settled());
        assert!(!with(|s| s.has_pending_requests = true).is_settled());
    }

    #[test]
    fn request_count_alone_does_not_drive_the_verdict() {
        // The boolean flag is authoritative; the count is diagnostic.
        let state = with(|s| s.pending_request_count = 3);
        assert!(state.is_settled());
    }
}
