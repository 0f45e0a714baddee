//! Fixed-capacity unsigned multi-limb integer.
//!
//! A `BigNum` owns a zero-filled buffer of exactly `capacity` limbs that is
//! allocated once and never resized. `len` counts the significant limbs,
//! least significant first. Every operation in [`crate::arith`] leaves the
//! buffer canonical:
//!
//! - `len >= 1`, and zero is `len == 1` with limb 0 equal to 0;
//! - `limbs[len - 1] != 0` whenever `len > 1`;
//! - every limb at a position `>= len` is zero.
//!
//! Writes past the capacity are contract violations and panic.

use std::cmp::Ordering;
use std::fmt;

use crate::calculator::FibError;
use crate::capacity::capacity_for;
use crate::constants::{LIMB_BITS, LIMB_BYTES};
use crate::decimal;

/// Fixed-capacity unsigned integer in base 2^64.
#[derive(Clone)]
pub struct BigNum {
    limbs: Vec<u64>,
    len: usize,
}

impl BigNum {
    /// Allocate a zero value with room for exactly `capacity` limbs.
    ///
    /// # Example
    /// ```
    /// use fibdrv_core::BigNum;
    ///
    /// let zero = BigNum::new(4).unwrap();
    /// assert_eq!(zero.capacity(), 4);
    /// assert_eq!(zero.len(), 1);
    /// assert!(zero.is_zero());
    /// assert!(BigNum::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> Result<Self, FibError> {
        if capacity == 0 {
            return Err(FibError::InvalidCapacity);
        }
        let mut limbs = Vec::new();
        limbs
            .try_reserve_exact(capacity)
            .map_err(|_| FibError::Allocation { limbs: capacity })?;
        limbs.resize(capacity, 0);
        Ok(Self { limbs, len: 1 })
    }

    /// Allocate a zero value sized for computing F(n).
    pub fn for_index(n: u64) -> Result<Self, FibError> {
        Self::new(capacity_for(n))
    }

    /// Build a value holding a single `u64`.
    pub fn from_u64(capacity: usize, value: u64) -> Result<Self, FibError> {
        let mut num = Self::new(capacity)?;
        num.limbs[0] = value;
        Ok(num)
    }

    /// Build a value from little-endian limbs. Trailing zero limbs are ignored.
    pub fn from_limbs(capacity: usize, limbs: &[u64]) -> Result<Self, FibError> {
        let significant = significant_len(limbs);
        if significant > capacity {
            return Err(FibError::CapacityExceeded {
                needed: significant,
                capacity,
            });
        }
        let mut num = Self::new(capacity)?;
        num.limbs[..significant].copy_from_slice(&limbs[..significant]);
        num.len = significant.max(1);
        Ok(num)
    }

    /// Build a value from raw little-endian bytes as produced by [`BigNum::to_le_bytes`].
    pub fn from_le_bytes(capacity: usize, bytes: &[u8]) -> Result<Self, FibError> {
        Self::from_limbs(capacity, &limbs_from_le_bytes(bytes))
    }

    /// Number of limbs the buffer can hold.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.limbs.len()
    }

    /// Number of significant limbs (always at least one).
    #[allow(clippy::len_without_is_empty)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// The significant limbs, least significant first.
    #[must_use]
    pub fn limbs(&self) -> &[u64] {
        &self.limbs[..self.len]
    }

    /// Whether the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.len == 1 && self.limbs[0] == 0
    }

    /// Bit length of the value (0 for zero).
    #[must_use]
    pub fn bits(&self) -> u64 {
        let top = self.limbs[self.len - 1];
        if top == 0 {
            return 0;
        }
        let below = (self.len as u64 - 1) * u64::from(LIMB_BITS);
        below + u64::from(LIMB_BITS - top.leading_zeros())
    }

    /// Raw transfer form: `len * 8` bytes, limbs least significant first,
    /// each limb little-endian.
    #[must_use]
    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.limbs()
            .iter()
            .flat_map(|limb| limb.to_le_bytes())
            .collect()
    }

    /// Number of bytes [`BigNum::to_le_bytes`] produces.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.len * LIMB_BYTES
    }

    /// Exchange the full representation of two values in constant time.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Reset to zero, keeping the buffer.
    pub fn set_zero(&mut self) {
        self.limbs[..self.len].fill(0);
        self.len = 1;
    }

    /// Reset to a single-limb value, keeping the buffer.
    pub fn set_u64(&mut self, value: u64) {
        self.set_zero();
        self.limbs[0] = value;
    }

    /// Recompute `len` by scanning down from the top of the buffer for the
    /// first nonzero limb.
    pub fn normalize(&mut self) {
        self.len = significant_len(&self.limbs).max(1);
    }

    /// Limb at position `i`, or zero past the end of the buffer.
    #[inline]
    pub(crate) fn limb(&self, i: usize) -> u64 {
        self.limbs.get(i).copied().unwrap_or(0)
    }

    pub(crate) fn limbs_mut(&mut self) -> &mut [u64] {
        &mut self.limbs
    }

    /// Panic unless `needed` limbs fit in this buffer.
    #[track_caller]
    pub(crate) fn ensure_capacity(&self, needed: usize) {
        assert!(
            needed <= self.capacity(),
            "limb capacity exceeded: operation needs {needed} limbs, buffer holds {}",
            self.capacity()
        );
    }

    /// Close an operation that wrote limbs `0..written`: clear limbs the
    /// previous value occupied above `written`, then renormalize.
    pub(crate) fn finish(&mut self, written: usize) {
        if written < self.len {
            self.limbs[written..self.len].fill(0);
        }
        self.normalize();
    }
}

/// Decode raw little-endian bytes into limbs. A short trailing chunk is
/// zero-extended.
#[must_use]
pub fn limbs_from_le_bytes(bytes: &[u8]) -> Vec<u64> {
    bytes
        .chunks(LIMB_BYTES)
        .map(|chunk| {
            let mut word = [0u8; LIMB_BYTES];
            word[..chunk.len()].copy_from_slice(chunk);
            u64::from_le_bytes(word)
        })
        .collect()
}

fn significant_len(limbs: &[u64]) -> usize {
    limbs.iter().rposition(|&limb| limb != 0).map_or(0, |i| i + 1)
}

impl PartialEq for BigNum {
    fn eq(&self, other: &Self) -> bool {
        self.limbs() == other.limbs()
    }
}

impl Eq for BigNum {}

impl Ord for BigNum {
    fn cmp(&self, other: &Self) -> Ordering {
        self.len.cmp(&other.len).then_with(|| {
            self.limbs()
                .iter()
                .rev()
                .cmp(other.limbs().iter().rev())
        })
    }
}

impl PartialOrd for BigNum {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for BigNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = decimal::format_decimal(self.limbs()).map_err(|_| fmt::Error)?;
        f.pad_integral(true, "", &text)
    }
}

impl fmt::Debug for BigNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BigNum")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .field("limbs", &self.limbs())
            .finish()
    }
}
