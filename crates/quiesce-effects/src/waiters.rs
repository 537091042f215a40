//! Waiter registration and evaluation.
//!
//! A waiter is an externally supplied readiness predicate bound to its
//! own context value. The registry keeps waiters in registration order
//! and reports "pending" while any predicate returns false. The poller
//! never mutates the registry; registration and removal belong to the
//! code that owns the asynchronous condition being tracked.

use quiesce_core::WaiterProbe;
use std::sync::{Arc, Mutex};
use tracing::trace;
use uuid::Uuid;

/// Handle identifying one registered waiter.
pub type WaiterId = Uuid;

/// An externally registered readiness condition.
pub trait Waiter: Send + Sync {
    /// True once the tracked condition has finished.
    ///
    /// Called on every poll tick; implementations should be cheap reads.
    fn is_ready(&self) -> bool;
}

/// A waiter built from a context value and a predicate over it.
///
/// The context is bound explicitly at construction and passed by
/// reference on every evaluation.
pub struct FnWaiter<C> {
    context: C,
    predicate: Box<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> FnWaiter<C> {
    /// Bind `predicate` to `context`.
    pub fn new(context: C, predicate: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        Self {
            context,
            predicate: Box::new(predicate),
        }
    }
}

impl<C: Send + Sync> Waiter for FnWaiter<C> {
    fn is_ready(&self) -> bool {
        (self.predicate)(&self.context)
    }
}

/// Ordered collection of registered waiters.
///
/// Clones share the same underlying collection.
#[derive(Clone, Default)]
pub struct WaiterRegistry {
    waiters: Arc<Mutex<Vec<(WaiterId, Arc<dyn Waiter>)>>>,
}

impl WaiterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a context/predicate pair; see [`FnWaiter`].
    pub fn register<C>(
        &self,
        context: C,
        predicate: impl Fn(&C) -> bool + Send + Sync + 'static,
    ) -> WaiterId
    where
        C: Send + Sync + 'static,
    {
        self.register_waiter(Arc::new(FnWaiter::new(context, predicate)))
    }

    /// Register a waiter object.
    pub fn register_waiter(&self, waiter: Arc<dyn Waiter>) -> WaiterId {
        let id = Uuid::new_v4();
        let mut waiters = self.waiters.lock().unwrap();
        waiters.push((id, waiter));
        trace!(%id, registered = waiters.len(), "waiter registered");
        id
    }

    /// Remove a waiter. Returns false if the id was not registered.
    pub fn deregister(&self, id: WaiterId) -> bool {
        let mut waiters = self.waiters.lock().unwrap();
        let before = waiters.len();
        waiters.retain(|(registered, _)| *registered != id);
        before != waiters.len()
    }

    /// Number of registered waiters, pending or not.
    pub fn len(&self) -> usize {
        self.waiters.lock().unwrap().len()
    }

    /// True if no waiters are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every registered waiter. Called at test setup/teardown.
    pub fn reset(&self) {
        self.waiters.lock().unwrap().clear();
    }
}

impl WaiterProbe for WaiterRegistry {
    fn has_pending_waiters(&self) -> bool {
        // Evaluation short-circuits on the first pending waiter; only
        // existence matters, not order.
        self.waiters
            .lock()
            .unwrap()
            .iter()
            .any(|(_, waiter)| !waiter.is_ready())
    }
}
