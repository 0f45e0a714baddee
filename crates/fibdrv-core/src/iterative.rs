//! Iterative Fibonacci engine.
//!
//! Two rolling buffers `a = F(i-1)` and `b = F(i)`; each step adds `b`
//! into `a` and swaps, so `b` always holds the latest value. O(n) additions.

use tracing::debug;

use crate::arith;
use crate::bignum::BigNum;
use crate::calculator::{Algorithm, Calculator, FibError};
use crate::capacity::{capacity_covers, capacity_for};
use crate::progress::CancellationToken;

/// Linear accumulator calculator.
///
/// # Example
/// ```
/// use fibdrv_core::calculator::Calculator;
/// use fibdrv_core::iterative::IterativeCalculator;
///
/// let f50 = IterativeCalculator::new().calculate(50).unwrap();
/// assert_eq!(f50.to_string(), "12586269025");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct IterativeCalculator;

impl IterativeCalculator {
    /// Create a new `IterativeCalculator`.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Calculator for IterativeCalculator {
    fn calculate_with_cancel(
        &self,
        cancel: &CancellationToken,
        n: u64,
    ) -> Result<BigNum, FibError> {
        let capacity = capacity_for(n);
        debug_assert!(capacity_covers(n), "capacity rule too small for F({n})");

        let mut a = BigNum::new(capacity)?;
        let mut b = BigNum::from_u64(capacity, 1)?;

        for _ in 2..=n {
            cancel.check_cancelled()?;
            arith::add_assign(&mut a, &b);
            a.swap(&mut b);
        }

        if n == 0 {
            a.swap(&mut b);
        }

        debug!(n, limbs = b.len(), capacity, "iterative engine finished");
        Ok(b)
    }

    fn algorithm(&self) -> Algorithm {
        Algorithm::Iterative
    }
}
