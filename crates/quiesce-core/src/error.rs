//! Wait failure taxonomy.
//!
//! A wait ends in exactly one of three ways: the predicate produces a
//! value (success), the predicate fails (its error is passed through
//! unwrapped), or the accumulated backoff delay reaches the configured
//! timeout. There is no local recovery and nothing is suppressed.

/// Boxed error type used to carry a caller's predicate failure without
/// wrapping it in a new message.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a [`wait_until`](crate::wait_until) operation.
#[derive(Debug, thiserror::Error)]
pub enum WaitError {
    /// Accumulated scheduled delay reached the configured timeout before
    /// the predicate produced a value.
    #[error("{message}")]
    TimedOut {
        /// Message captured when the wait started, so diagnostics name
        /// the call site rather than the timeout fire.
        message: String,
    },

    /// The predicate failed. The original error is preserved as-is and
    /// both `Display` and `source` pass straight through to it.
    #[error(transparent)]
    Predicate(BoxError),
}

impl WaitError {
    /// Create a timeout error with the given message.
    pub fn timed_out(message: impl Into<String>) -> Self {
        Self::TimedOut {
            message: message.into(),
        }
    }

    /// Create a predicate failure carrying the caller's error.
    pub fn predicate(err: impl Into<BoxError>) -> Self {
        Self::Predicate(err.into())
    }

    /// True if this failure is a timeout rather than a predicate error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut { .. })
    }
}
