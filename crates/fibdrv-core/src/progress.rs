//! Cooperative cancellation for long sweeps.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::calculator::FibError;

/// Cooperative cancellation token using an atomic flag.
///
/// Engines check it once per iteration; the client sets it from a Ctrl+C
/// handler so a sweep stops between indices.
///
/// # Example
/// ```
/// use fibdrv_core::progress::CancellationToken;
///
/// let token = CancellationToken::new();
/// assert!(!token.is_cancelled());
///
/// token.cancel();
/// assert!(token.is_cancelled());
/// assert!(token.check_cancelled().is_err());
/// ```
#[derive(Clone, Debug)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new cancellation token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Checkpoint: returns `Err(FibError::Cancelled)` once cancelled.
    pub fn check_cancelled(&self) -> Result<(), FibError> {
        if self.is_cancelled() {
            Err(FibError::Cancelled)
        } else {
            Ok(())
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}
