//! Activity probe interfaces.
//!
//! These traits are the seams between the poller and the asynchronous
//! subsystems it watches. Implementations live in `quiesce-effects`
//! (production trackers driven by the embedding scheduler) and
//! `quiesce-testkit` (controllable doubles).
//!
//! All methods are synchronous reads with no side effects: they are
//! invoked from inside the poll predicate, which runs between scheduled
//! delays and must never await.

use std::sync::Arc;

/// Reports scheduler activity: timers that have been scheduled but not
/// yet fired, and run-loop processing cycles that are currently open.
///
/// The two signals are distinct - a cycle can be open with no timers
/// queued, and timers can be pending outside any cycle.
pub trait SchedulerProbe: Send + Sync {
    /// True if scheduled-but-unfired timer callbacks exist.
    fn has_pending_timers(&self) -> bool;

    /// True if a run-loop processing cycle is currently open.
    fn has_open_run_loop(&self) -> bool;
}

/// Reports in-flight request activity.
pub trait RequestProbe: Send + Sync {
    /// Number of requests that have started but not yet finished.
    fn pending_request_count(&self) -> usize;
}

/// Reports externally registered waiter activity.
///
/// A waiter is *pending* while its readiness predicate returns false.
/// Zero registered waiters means no pending waiters.
pub trait WaiterProbe: Send + Sync {
    /// True if any registered waiter is still pending.
    fn has_pending_waiters(&self) -> bool;
}

/// Blanket implementation for Arc<T> where T: SchedulerProbe
impl<T: SchedulerProbe + ?Sized> SchedulerProbe for Arc<T> {
    fn has_pending_timers(&self) -> bool {
        (**self).has_pending_timers()
    }

    fn has_open_run_loop(&self) -> bool {
        (**self).has_open_run_loop()
    }
}

/// Blanket implementation for Arc<T> where T: RequestProbe
impl<T: RequestProbe + ?Sized> RequestProbe for Arc<T> {
    fn pending_request_count(&self) -> usize {
        (**self).pending_request_count()
    }
}

/// Blanket implementation for Arc<T> where T: WaiterProbe
impl<T: WaiterProbe + ?Sized> WaiterProbe for Arc<T> {
    fn has_pending_waiters(&self) -> bool {
        (**self).has_pending_waiters()
    }
}
