//! # fibdrv-core
//!
//! Numeric core of fibdrv-rs: a fixed-capacity multi-limb integer, the
//! arithmetic kernel over it, iterative and fast-doubling Fibonacci engines,
//! and the decimal renderer.

pub mod arith;
pub mod bignum;
pub mod calculator;
pub mod capacity;
pub mod constants;
pub mod decimal;
pub mod fastdoubling;
pub mod iterative;
pub mod progress;
pub mod registry;
pub mod timing;

// Re-exports
pub use bignum::BigNum;
pub use calculator::{Algorithm, Calculator, FibError};
pub use capacity::capacity_for;
pub use constants::{exit_codes, MAX_INDEX};
pub use registry::DefaultFactory;
pub use timing::TimedRun;

/// Compute F(index) with the chosen algorithm.
///
/// Negative indices are rejected with [`FibError::InvalidIndex`]; ownership
/// of the result passes to the caller.
///
/// # Example
/// ```
/// use fibdrv_core::{compute, Algorithm};
///
/// assert_eq!(compute(10, Algorithm::Iterative).unwrap().to_string(), "55");
/// assert!(compute(-1, Algorithm::FastDoubling).is_err());
/// ```
pub fn compute(index: i64, algorithm: Algorithm) -> Result<BigNum, FibError> {
    let n = u64::try_from(index).map_err(|_| FibError::InvalidIndex(index))?;
    registry::create_calculator(algorithm).calculate(n)
}

/// Compute F(n) using the fast doubling engine.
///
/// # Panics
///
/// Panics if the limb buffers for `n` cannot be allocated. Use [`compute`]
/// to get that failure as [`FibError::Allocation`] instead.
///
/// # Example
/// ```
/// assert_eq!(fibdrv_core::fibonacci(50).to_string(), "12586269025");
/// ```
#[must_use]
pub fn fibonacci(n: u64) -> BigNum {
    fastdoubling::FastDoublingCalculator::new()
        .calculate(n)
        .expect("fast doubling should not fail for an allocatable index")
}
