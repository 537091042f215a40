//! Scheduler activity tracking.
//!
//! The embedding scheduler reports its own activity here: timers as they
//! are scheduled and fired, run-loop cycles as they open and close. The
//! tracker exposes both through [`SchedulerProbe`] for the poller. The
//! two signals are independent - a cycle can be open with no timers
//! queued.

use quiesce_core::SchedulerProbe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Counter-based scheduler probe driven by the embedding scheduler.
///
/// Clones share the same counters.
#[derive(Debug, Clone, Default)]
pub struct SchedulerTracker {
    pending_timers: Arc<AtomicUsize>,
    open_cycles: Arc<AtomicUsize>,
}

impl SchedulerTracker {
    /// Create a tracker with no recorded activity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a timer being scheduled.
    pub fn timer_scheduled(&self) {
        self.pending_timers.fetch_add(1, Ordering::AcqRel);
    }

    /// Record a scheduled timer firing or being cancelled.
    pub fn timer_fired(&self) {
        // Never underflows: firing an untracked timer is ignored.
        let _ = self
            .pending_timers
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
    }

    /// Record a run-loop cycle opening.
    pub fn begin_cycle(&self) {
        self.open_cycles.fetch_add(1, Ordering::AcqRel);
    }

    /// Record a run-loop cycle closing.
    pub fn end_cycle(&self) {
        let _ = self
            .open_cycles
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
    }

    /// Clear all recorded activity. Called at test setup/teardown.
    pub fn reset(&self) {
        self.pending_timers.store(0, Ordering::Release);
        self.open_cycles.store(0, Ordering::Release);
    }
}

impl SchedulerProbe for SchedulerTracker {
    fn has_pending_timers(&self) -> bool {
        self.pending_timers.load(Ordering::Acquire) > 0
    }

    fn has_open_run_loop(&self) -> bool {
        self.open_cycles.load(Ordering::Acquire) > 0
    }
}
