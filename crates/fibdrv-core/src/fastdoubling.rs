//! Fast Doubling engine.
//!
//! Uses the doubling identities:
//!   F(2k)   = F(k) * (2*F(k+1) - F(k))
//!   F(2k+1) = F(k)^2 + F(k+1)^2
//!
//! Walks the bits of n from MSB to LSB keeping `(a, b) = (F(k), F(k+1))`
//! for the prefix consumed so far. Five buffers are allocated up front and
//! rotated with swaps; no round allocates.

use tracing::debug;

use crate::arith;
use crate::bignum::BigNum;
use crate::calculator::{Algorithm, Calculator, FibError};
use crate::capacity::{capacity_covers, capacity_for};
use crate::progress::CancellationToken;

/// Working buffers for one fast-doubling computation.
struct DoublingState {
    /// F(k).
    a: BigNum,
    /// F(k+1).
    b: BigNum,
    /// F(2k).
    c: BigNum,
    /// F(2k+1).
    d: BigNum,
    /// Scratch for `2b - a` and `b^2`.
    tmp: BigNum,
}

impl DoublingState {
    fn new(capacity: usize) -> Result<Self, FibError> {
        Ok(Self {
            a: BigNum::new(capacity)?,
            b: BigNum::from_u64(capacity, 1)?,
            c: BigNum::new(capacity)?,
            d: BigNum::new(capacity)?,
            tmp: BigNum::new(capacity)?,
        })
    }

    /// Advance `(F(k), F(k+1))` to `(F(2k), F(2k+1))`, or to
    /// `(F(2k+1), F(2k+2))` when `bit_set`.
    fn step(&mut self, bit_set: bool) {
        // c = a * (2b - a)
        arith::double_shift(&mut self.tmp, &self.b);
        arith::sub_assign(&mut self.tmp, &self.a);
        arith::multiply(&mut self.c, &self.a, &self.tmp);

        // d = a^2 + b^2
        arith::square(&mut self.d, &self.a);
        arith::square(&mut self.tmp, &self.b);
        arith::add_assign(&mut self.d, &self.tmp);

        if bit_set {
            arith::add(&mut self.b, &self.c, &self.d);
            self.a.swap(&mut self.d);
        } else {
            self.a.swap(&mut self.c);
            self.b.swap(&mut self.d);
        }
    }
}

/// Fast Doubling calculator.
///
/// # Example
/// ```
/// use fibdrv_core::calculator::Calculator;
/// use fibdrv_core::fastdoubling::FastDoublingCalculator;
///
/// let f100 = FastDoublingCalculator::new().calculate(100).unwrap();
/// assert_eq!(f100.to_string(), "354224848179261915075");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FastDoublingCalculator;

impl FastDoublingCalculator {
    /// Create a new `FastDoublingCalculator`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Calculator for FastDoublingCalculator {
    fn calculate_with_cancel(
        &self,
        cancel: &CancellationToken,
        n: u64,
    ) -> Result<BigNum, FibError> {
        let capacity = capacity_for(n);
        debug_assert!(capacity_covers(n), "capacity rule too small for F({n})");

        // n = 0 and n = 1 have no bits to walk past the leading one.
        if n < 2 {
            return BigNum::from_u64(capacity, n);
        }

        let num_bits = u64::BITS - n.leading_zeros();
        let mut state = DoublingState::new(capacity)?;
        for i in (0..num_bits).rev() {
            cancel.check_cancelled()?;
            state.step((n >> i) & 1 == 1);
        }

        debug!(
            n,
            rounds = num_bits,
            limbs = state.a.len(),
            capacity,
            "fast doubling engine finished"
        );
        Ok(state.a)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::FastDoubling
    }
}
