//! Quiesce Effects - Production Probe Handlers
//!
//! Concrete implementations of the probe interfaces defined in
//! `quiesce-core`, plus the [`QuiesceContext`] bundle that wires them
//! together for a test run.
//!
//! The trackers here are the mutable state of the settledness model: the
//! embedding harness drives them (start/finish a request, register a
//! waiter, open/close a run-loop cycle) and the poller only ever reads
//! them through the core probe traits. Each context owns its own
//! trackers - there is no process-wide state - so concurrent test runs
//! cannot interfere.

#![forbid(unsafe_code)]

/// Context bundle and settled-wait operations
pub mod context;

/// In-flight request tracking
pub mod requests;

/// Scheduler activity tracking
pub mod scheduler;

/// Waiter registration and evaluation
pub mod waiters;

pub use context::{QuiesceContext, SettleOptions};
pub use requests::{RequestHandle, RequestTracker};
pub use scheduler::SchedulerTracker;
pub use waiters::{FnWaiter, Waiter, WaiterId, WaiterRegistry};
