//! The Fibonacci device and its single session.
//!
//! `FibDevice::open` hands out at most one [`Session`] at a time. The
//! session owns the gate's guard, so the device becomes free again when the
//! session is dropped, whatever path the caller leaves by.

use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use fibdrv_core::capacity::capacity_for;
use fibdrv_core::constants::{LIMB_BYTES, MAX_INDEX};
use fibdrv_core::timing::{time_calculation, TimedRun};
use fibdrv_core::{Algorithm, BigNum, DefaultFactory};

use crate::error::DeviceError;
use crate::seek::{resolve, Whence};

/// In-process model of the Fibonacci character device.
pub struct FibDevice {
    gate: Mutex<()>,
    max_index: u64,
    factory: DefaultFactory,
}

impl FibDevice {
    /// Create a device accepting indices up to [`MAX_INDEX`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_index(MAX_INDEX)
    }

    /// Create a device accepting indices up to `max_index`.
    #[must_use]
    pub fn with_max_index(max_index: u64) -> Self {
        Self {
            gate: Mutex::new(()),
            max_index,
            factory: DefaultFactory::new(),
        }
    }

    /// Open the device. Fails immediately with [`DeviceError::Busy`] while
    /// another session is live; there is no queueing.
    pub fn open(&self) -> Result<Session<'_>, DeviceError> {
        let Some(guard) = self.gate.try_lock() else {
            warn!("fibdrv is in use");
            return Err(DeviceError::Busy);
        };
        info!(max_index = self.max_index, "session opened");
        Ok(Session {
            _guard: guard,
            device: self,
            position: 0,
            read_algorithm: Algorithm::FastDoubling,
        })
    }

    /// Whether a session currently holds the device.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.gate.is_locked()
    }

    /// Largest index a session can seek to.
    #[must_use]
    pub fn max_index(&self) -> u64 {
        self.max_index
    }

    /// A read buffer of this many bytes fits the value at any index.
    #[must_use]
    pub fn max_read_len(&self) -> usize {
        capacity_for(self.max_index).saturating_mul(LIMB_BYTES)
    }
}

impl Default for FibDevice {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive handle on an open device.
pub struct Session<'a> {
    _guard: MutexGuard<'a, ()>,
    device: &'a FibDevice,
    position: u64,
    read_algorithm: Algorithm,
}

impl Session<'_> {
    /// Current position, i.e. the index the next read or write computes.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Move the position and return it, clamped into `[0, max_index]`.
    pub fn seek(&mut self, offset: i64, whence: Whence) -> u64 {
        self.position = resolve(self.position, offset, whence, self.device.max_index);
        self.position
    }

    /// Algorithm used by [`Session::read`].
    #[must_use]
    pub fn read_algorithm(&self) -> Algorithm {
        self.read_algorithm
    }

    /// Choose the algorithm used by [`Session::read`].
    pub fn set_read_algorithm(&mut self, algorithm: Algorithm) {
        self.read_algorithm = algorithm;
    }

    /// Compute F(position) with the algorithm selected by `buf.len()`
    /// (0 iterative, 1 fast doubling), discard it, and return the elapsed
    /// nanoseconds.
    pub fn write(&mut self, buf: &[u8]) -> Result<u64, DeviceError> {
        let algorithm =
            Algorithm::from_selector(buf.len()).ok_or(DeviceError::InvalidSelector(buf.len()))?;
        Ok(self.write_timed(algorithm)?.elapsed_ns())
    }

    /// Timed computation of F(position) with an explicit algorithm.
    pub fn write_timed(&mut self, algorithm: Algorithm) -> Result<TimedRun, DeviceError> {
        let calc = self.device.factory.for_algorithm(algorithm);
        let run = time_calculation(calc.as_ref(), self.position)?;
        debug!(
            index = run.index,
            algorithm = %run.algorithm,
            ns = run.elapsed_ns(),
            "timed write"
        );
        Ok(run)
    }

    /// Compute F(position) and return the value.
    pub fn read_bignum(&mut self) -> Result<BigNum, DeviceError> {
        let calc = self.device.factory.for_algorithm(self.read_algorithm);
        Ok(calc.calculate(self.position)?)
    }

    /// Compute F(position) and copy its limbs into `buf` as little-endian
    /// bytes, least significant limb first. Returns the number of bytes
    /// written, always a multiple of 8.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, DeviceError> {
        let value = self.read_bignum()?;
        let needed = value.byte_len();
        if buf.len() < needed {
            return Err(DeviceError::BufferTooSmall {
                needed,
                available: buf.len(),
            });
        }
        for (chunk, limb) in buf.chunks_exact_mut(LIMB_BYTES).zip(value.limbs()) {
            chunk.copy_from_slice(&limb.to_le_bytes());
        }
        Ok(needed)
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        info!(position = self.position, "session closed");
    }
}
