//! Quiesce Testing Infrastructure
//!
//! Controllable doubles for the probe interfaces, waiter fixtures, and a
//! builder for assembling a [`QuiesceContext`] wired to them. This crate
//! exists so tests of settledness behavior can flip activity flags
//! directly instead of standing up a real scheduler.
//!
//! # Usage
//!
//! Add this to your crate's `Cargo.toml` dev-dependencies:
//! ```toml
//! [dev-dependencies]
//! quiesce-testkit = { path = "../quiesce-testkit" }
//! ```
//!
//! Then in your tests:
//! ```rust,no_run
//! use quiesce_testkit::TestContextBuilder;
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let fixture = TestContextBuilder::new().with_pending_timers(true).build();
//!     assert!(!fixture.context.is_settled());
//!     fixture.scheduler.set_pending_timers(false);
//!     fixture.context.settled().await;
//! }
//! ```

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod context;
pub mod logging;
pub mod scheduler;
pub mod waiters;

// Re-export commonly used items
pub use context::{TestContext, TestContextBuilder};
pub use logging::init_test_tracing;
pub use scheduler::ControllableScheduler;
pub use waiters::{FlagWaiter, StepWaiter};

// Re-export the types tests interact with most
pub use quiesce_core::{SettledState, WaitError, WaitOptions};
pub use quiesce_effects::{QuiesceContext, RequestTracker, SettleOptions, WaiterRegistry};
