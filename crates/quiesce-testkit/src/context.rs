//! Test context fixture and builder.

use crate::scheduler::ControllableScheduler;
use quiesce_effects::{QuiesceContext, RequestHandle, RequestTracker, WaiterRegistry};
use std::sync::Arc;

/// A [`QuiesceContext`] wired to controllable probes, plus the handles a
/// test needs to drive them.
#[derive(Clone)]
pub struct TestContext {
    /// The context under test.
    pub context: QuiesceContext,
    /// Scheduler double shared with the context.
    pub scheduler: ControllableScheduler,
    /// Handles for requests opened by the builder, in open order.
    pub open_requests: Vec<RequestHandle>,
}

/// Builder for assembling a [`TestContext`] in a known starting state.
#[derive(Clone, Default)]
pub struct TestContextBuilder {
    pending_timers: bool,
    run_loop_open: bool,
    open_requests: usize,
}

impl TestContextBuilder {
    /// Start from an all-quiet state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with pending timers reported.
    pub fn with_pending_timers(mut self, pending: bool) -> Self {
        self.pending_timers = pending;
        self
    }

    /// Start with an open run-loop cycle reported.
    pub fn with_run_loop(mut self, open: bool) -> Self {
        self.run_loop_open = open;
        self
    }

    /// Start with `count` requests already in flight.
    pub fn with_open_requests(mut self, count: usize) -> Self {
        self.open_requests = count;
        self
    }

    /// Assemble the fixture.
    pub fn build(self) -> TestContext {
        tracing::trace!(
            pending_timers = self.pending_timers,
            run_loop_open = self.run_loop_open,
            open_requests = self.open_requests,
            "building test context"
        );

        let scheduler = ControllableScheduler::new();
        scheduler.set_pending_timers(self.pending_timers);
        scheduler.set_run_loop(self.run_loop_open);

        let requests = RequestTracker::new();
        let open_requests = (0..self.open_requests).map(|_| requests.start()).collect();

        let context = QuiesceContext::with_trackers(
            Arc::new(scheduler.clone()),
            requests,
            WaiterRegistry::new(),
        );

        TestContext {
            context,
            scheduler,
            open_requests,
        }
    }
}
