//! Context bundle and settled-wait operations.
//!
//! A [`QuiesceContext`] is the explicitly passed alternative to
//! process-wide settledness state: the test-orchestration layer creates
//! one at setup, hands it to whatever issues requests or registers
//! waiters, and resets it at teardown. Two contexts never share state,
//! so parallel test runs cannot observe each other's activity.

use crate::requests::RequestTracker;
use crate::waiters::WaiterRegistry;
use quiesce_core::{wait_until, SchedulerProbe, SettledState, WaitOptions};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

/// Per-subsystem toggles for a filtered settled wait.
///
/// A subsystem with its toggle off is ignored when judging settledness.
/// The timer toggle covers both pending timers and the open run loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettleOptions {
    /// Wait for pending timers and the run loop to drain.
    pub wait_for_timers: bool,
    /// Wait for in-flight requests to finish.
    pub wait_for_requests: bool,
    /// Wait for registered waiters to report ready.
    pub wait_for_waiters: bool,
}

impl Default for SettleOptions {
    fn default() -> Self {
        Self {
            wait_for_timers: true,
            wait_for_requests: true,
            wait_for_waiters: true,
        }
    }
}

/// Bundle of the three probe handles for one test run.
///
/// The request tracker and waiter registry are owned by the context; the
/// scheduler probe is supplied by the embedding scheduler. All
/// settledness reads go through [`QuiesceContext::settled_state`], which
/// samples every probe fresh.
#[derive(Clone)]
pub struct QuiesceContext {
    scheduler: Arc<dyn SchedulerProbe>,
    requests: RequestTracker,
    waiters: WaiterRegistry,
}

impl QuiesceContext {
    /// Create a context around the given scheduler probe, with fresh
    /// request and waiter collections.
    pub fn new(scheduler: Arc<dyn SchedulerProbe>) -> Self {
        Self::with_trackers(scheduler, RequestTracker::new(), WaiterRegistry::new())
    }

    /// Create a context from existing trackers.
    ///
    /// Used by builders that want to keep their own handles to the
    /// trackers; clones of the trackers share state with the context.
    pub fn with_trackers(
        scheduler: Arc<dyn SchedulerProbe>,
        requests: RequestTracker,
        waiters: WaiterRegistry,
    ) -> Self {
        Self {
            scheduler,
            requests,
            waiters,
        }
    }

    /// The request tracker driven by request-issuing code.
    pub fn requests(&self) -> &RequestTracker {
        &self.requests
    }

    /// The waiter registry driven by condition-owning code.
    pub fn waiters(&self) -> &WaiterRegistry {
        &self.waiters
    }

    /// Take a fresh settledness snapshot from all probes.
    pub fn settled_state(&self) -> SettledState {
        SettledState::sample(&*self.scheduler, &self.requests, &self.waiters)
    }

    /// True iff the system is settled at this moment.
    pub fn is_settled(&self) -> bool {
        self.settled_state().is_settled()
    }

    /// Resolve once the system reaches a settled state.
    ///
    /// Waits indefinitely: settling late is preferable to failing
    /// closed, and the surrounding harness is expected to impose its own
    /// outer bound.
    pub async fn settled(&self) {
        // With the timeout disabled and an infallible predicate, the
        // wait can only resolve.
        let _ = wait_until(
            || self.is_settled().then_some(()),
            WaitOptions::default().no_timeout(),
        )
        .await;
    }

    /// Resolve once every subsystem selected in `options` is quiet.
    ///
    /// Like [`QuiesceContext::settled`], this waits indefinitely.
    pub async fn wait(&self, options: SettleOptions) {
        let _ = wait_until(
            || {
                let state = self.settled_state();

                if options.wait_for_timers && (state.has_pending_timers || state.has_run_loop) {
                    return None;
                }
                if options.wait_for_requests && state.has_pending_requests {
                    return None;
                }
                if options.wait_for_waiters && state.has_pending_waiters {
                    return None;
                }

                Some(())
            },
            WaitOptions::default().no_timeout(),
        )
        .await;
    }

    /// Clear the context-owned collections back to a settled baseline.
    ///
    /// The scheduler probe belongs to the embedding scheduler and is not
    /// touched.
    pub fn reset(&self) {
        trace!("resetting quiesce context");
        self.requests.reset();
        self.waiters.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::SchedulerTracker;

    fn test_context() -> (QuiesceContext, SchedulerTracker) {
        let scheduler = SchedulerTracker::new();
        let context = QuiesceContext::new(Arc::new(scheduler.clone()));
        (context, scheduler)
    }

    #[test]
    fn fresh_context_is_settled() {
        let (context, _scheduler) = test_context();
        assert!(context.is_settled());
        assert_eq!(context.settled_state(), SettledState::settled());
    }

    #[test]
    fn pending_requests_are_counted_in_the_snapshot() {
        let (context, _scheduler) = test_context();
        context.requests().start();
        context.requests().start();

        let state = context.settled_state();
        assert_eq!(state.pending_request_count, 2);
        assert!(state.has_pending_requests);
        assert!(!state.has_pending_timers);
        assert!(!context.is_settled());
    }

    #[test]
    fn scheduler_activity_blocks_settledness() {
        let (context, scheduler) = test_context();

        scheduler.timer_scheduled();
        assert!(context.settled_state().has_pending_timers);
        assert!(!context.is_settled());

        scheduler.timer_fired();
        scheduler.begin_cycle();
        assert!(context.settled_state().has_run_loop);
        assert!(!context.is_settled());

        scheduler.end_cycle();
        assert!(context.is_settled());
    }

    #[test]
    fn reset_returns_a_dirty_context_to_settled() {
        let (context, _scheduler) = test_context();
        context.requests().start();
        context.waiters().register((), |_| false);
        assert!(!context.is_settled());

        context.reset();
        assert!(context.is_settled());
    }

    #[tokio::test(start_paused = true)]
    async fn settled_resolves_immediately_when_already_quiet() {
        let (context, _scheduler) = test_context();

        let start = tokio::time::Instant::now();
        context.settled().await;
        assert_eq!(start.elapsed(), std::time::Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn settled_waits_for_requests_to_finish() {
        let (context, _scheduler) = test_context();
        let handle = context.requests().start();

        let requests = context.requests().clone();
        let waiter = tokio::spawn({
            let context = context.clone();
            async move { context.settled().await }
        });

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        requests.finish(handle);

        waiter.await.unwrap();
        assert!(context.is_settled());
    }

    #[tokio::test(start_paused = true)]
    async fn filtered_wait_ignores_toggled_off_subsystems() {
        let (context, _scheduler) = test_context();
        context.requests().start();

        // Requests are pending, but the filter does not care.
        context
            .wait(SettleOptions {
                wait_for_requests: false,
                ..SettleOptions::default()
            })
            .await;

        assert!(!context.is_settled());
    }
}
