//! Device error type.

use fibdrv_core::FibError;

/// Errors surfaced by the device and its sessions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    /// Another session holds the device.
    #[error("device busy: another session is open")]
    Busy,

    /// A write's byte count did not name an algorithm.
    #[error("invalid algorithm selector {0}: expected 0 (iterative) or 1 (fast doubling)")]
    InvalidSelector(usize),

    /// The read buffer cannot hold the value's limbs.
    #[error("buffer too small: value needs {needed} bytes, buffer holds {available}")]
    BufferTooSmall {
        /// Bytes the value occupies.
        needed: usize,
        /// Bytes the caller offered.
        available: usize,
    },

    /// The engine failed.
    #[error(transparent)]
    Compute(#[from] FibError),
}
