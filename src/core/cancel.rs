//! Cooperative cancellation
//!
//! A [`CancellationToken`] is a shared flag owned by one session. Any holder of a
//! clone can set it (the signal handler, the progress surface, a test) and the
//! walk polls it at every loop head. Once set it stays set.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared, set-once cancellation flag
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    ///
    /// Returns `true` only for the call that flipped the flag.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::SeqCst)
    }

    /// Check whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
