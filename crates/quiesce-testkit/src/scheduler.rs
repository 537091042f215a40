//! Controllable scheduler probe for deterministic testing.

use quiesce_core::SchedulerProbe;
use std::sync::{Arc, Mutex};

/// Scheduler probe whose flags are set directly by the test.
///
/// Clones share state, so a test can keep one handle for flipping flags
/// while the context under test reads through another.
#[derive(Debug, Clone, Default)]
pub struct ControllableScheduler {
    pending_timers: Arc<Mutex<bool>>,
    run_loop_open: Arc<Mutex<bool>>,
}

impl ControllableScheduler {
    /// Create a scheduler double with no reported activity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report (or stop reporting) pending timers.
    pub fn set_pending_timers(&self, pending: bool) {
        *self.pending_timers.lock().unwrap() = pending;
    }

    /// Report (or stop reporting) an open run-loop cycle.
    pub fn set_run_loop(&self, open: bool) {
        *self.run_loop_open.lock().unwrap() = open;
    }
}

impl SchedulerProbe for ControllableScheduler {
    fn has_pending_timers(&self) -> bool {
        *self.pending_timers.lock().unwrap()
    }

    fn has_open_run_loop(&self) -> bool {
        *self.run_loop_open.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_are_independent_and_shared_across_clones() {
        let scheduler = ControllableScheduler::new();
        let shared = scheduler.clone();

        scheduler.set_pending_timers(true);
        assert!(shared.has_pending_timers());
        assert!(!shared.has_open_run_loop());

        shared.set_run_loop(true);
        scheduler.set_pending_timers(false);
        assert!(!scheduler.has_pending_timers());
        assert!(scheduler.has_open_run_loop());
    }
}
