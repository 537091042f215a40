//! Waiter fixtures with scripted readiness.

use quiesce_effects::Waiter;
use std::sync::{Arc, Mutex};

/// Waiter that reports not-ready for a fixed number of polls, then
/// ready forever after.
///
/// `StepWaiter::new(1)` reproduces the classic flip scenario: pending on
/// the first settledness check, ready on every later one.
#[derive(Debug, Clone)]
pub struct StepWaiter {
    remaining: Arc<Mutex<u32>>,
}

impl StepWaiter {
    /// Stay pending for `polls` readiness checks.
    pub fn new(polls: u32) -> Self {
        Self {
            remaining: Arc::new(Mutex::new(polls)),
        }
    }

    /// Readiness checks still to absorb before reporting ready.
    pub fn remaining(&self) -> u32 {
        *self.remaining.lock().unwrap()
    }
}

impl Waiter for StepWaiter {
    fn is_ready(&self) -> bool {
        let mut remaining = self.remaining.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            false
        } else {
            true
        }
    }
}

/// Waiter controlled by an explicit flag.
#[derive(Debug, Clone, Default)]
pub struct FlagWaiter {
    ready: Arc<Mutex<bool>>,
}

impl FlagWaiter {
    /// Create a waiter that starts out pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the readiness flag.
    pub fn set_ready(&self, ready: bool) {
        *self.ready.lock().unwrap() = ready;
    }
}

impl Waiter for FlagWaiter {
    fn is_ready(&self) -> bool {
        *self.ready.lock().unwrap()
    }
}
