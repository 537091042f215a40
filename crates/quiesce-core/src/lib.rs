//! Quiesce Core - Settledness Model Foundation
//!
//! This crate provides the foundational types and probe interfaces that
//! define settledness for Quiesce. It contains the one real algorithm in
//! the workspace - the `wait_until` polling loop - plus pure signatures
//! for the activity sources it consults. Concrete probe implementations
//! live in `quiesce-effects`; controllable test doubles live in
//! `quiesce-testkit`.
//!
//! # Settledness
//!
//! A system under test is *settled* when, at a single moment of
//! evaluation, all of the following hold:
//!
//! - no scheduled-but-unfired timers exist,
//! - no run-loop processing cycle is open,
//! - no tracked requests are in flight,
//! - no registered waiter reports an outstanding condition.
//!
//! Each poll tick takes a fresh [`SettledState`] snapshot; nothing is
//! memoized across ticks.
//!
//! # Probe Interfaces (Pure Signatures)
//!
//! - [`SchedulerProbe`]: pending timers and open run-loop cycles
//! - [`RequestProbe`]: in-flight request count
//! - [`WaiterProbe`]: externally registered readiness predicates
//!
//! Probe methods are synchronous by contract: the poller's predicate runs
//! between scheduled delays and must never await.

#![forbid(unsafe_code)]

/// Fixed escalating backoff schedule for the poller
pub mod backoff;

/// Wait failure taxonomy
pub mod error;

/// Activity probe interfaces (no implementations)
pub mod probes;

/// Settledness snapshot record
pub mod state;

/// Generic wait-until polling loop
pub mod wait;

pub use backoff::delay_for_attempt;
pub use error::{BoxError, WaitError};
pub use probes::{RequestProbe, SchedulerProbe, WaiterProbe};
pub use state::SettledState;
pub use wait::{try_wait_until, wait_until, WaitOptions};
