//! In-flight request tracking.
//!
//! A request is pending from `start` until `finish`. The collection is
//! owned by a [`QuiesceContext`](crate::QuiesceContext): created at test
//! setup, accumulated during the test by whatever issues requests, and
//! cleared by `reset` at teardown. The poller only reads it through
//! [`RequestProbe`].
//!
//! # Blocking Lock Usage
//!
//! Uses `std::sync::Mutex` because this is test infrastructure: probes
//! are short synchronous reads, contention is not a concern, and the
//! simpler API keeps the handlers clear.

use quiesce_core::RequestProbe;
use std::sync::{Arc, Mutex};
use tracing::trace;
use uuid::Uuid;

/// Handle identifying one in-flight request.
pub type RequestHandle = Uuid;

/// Tracks requests that have started but not yet finished.
///
/// Clones share the same underlying collection, so a harness can hand
/// out handles to request-issuing code while the context keeps one for
/// the probe side.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    requests: Arc<Mutex<Vec<RequestHandle>>>,
}

impl RequestTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start of a request and return its handle.
    pub fn start(&self) -> RequestHandle {
        let handle = Uuid::new_v4();
        let mut requests = self.requests.lock().unwrap();
        requests.push(handle);
        trace!(%handle, pending = requests.len(), "request started");
        handle
    }

    /// Record the completion of a request.
    ///
    /// Finishing a handle that was never started, or was already
    /// finished, is a no-op.
    pub fn finish(&self, handle: RequestHandle) {
        let mut requests = self.requests.lock().unwrap();
        requests.retain(|pending| *pending != handle);
        trace!(%handle, pending = requests.len(), "request finished");
    }

    /// Number of requests currently in flight.
    pub fn pending_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Drop every tracked request. Called at test setup/teardown.
    pub fn reset(&self) {
        self.requests.lock().unwrap().clear();
    }
}

impl RequestProbe for RequestTracker {
    fn pending_request_count(&self) -> usize {
        self.pending_count()
    }
}
