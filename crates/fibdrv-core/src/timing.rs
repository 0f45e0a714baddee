//! Timing harness around engine calls.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::calculator::{Algorithm, Calculator, FibError};

/// Run `f` and measure its wall-clock duration.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// One timed computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedRun {
    /// Fibonacci index.
    pub index: u64,
    /// Engine used.
    pub algorithm: Algorithm,
    /// Wall-clock time of the computation.
    pub elapsed: Duration,
}

impl TimedRun {
    /// Elapsed time in nanoseconds, saturating at `u64::MAX`.
    #[must_use]
    pub fn elapsed_ns(&self) -> u64 {
        u64::try_from(self.elapsed.as_nanos()).unwrap_or(u64::MAX)
    }
}

/// Compute F(index) with `calc`, discard the value, and report the time taken.
pub fn time_calculation(calc: &dyn Calculator, index: u64) -> Result<TimedRun, FibError> {
    let (result, elapsed) = timed(|| calc.calculate(index));
    drop(result?);
    Ok(TimedRun {
        index,
        algorithm: calc.algorithm(),
        elapsed,
    })
}

/// [`time_calculation`] with the registered engine for `algorithm`.
pub fn time_compute(index: u64, algorithm: Algorithm) -> Result<TimedRun, FibError> {
    time_calculation(crate::registry::create_calculator(algorithm).as_ref(), index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fastdoubling::FastDoublingCalculator;
    use crate::iterative::IterativeCalculator;

    #[test]
    fn timed_returns_value() {
        let (value, elapsed) = timed(|| 21 * 2);
        assert_eq!(value, 42);
        assert!(elapsed < Duration::from_secs(5));
    }

    #[test]
    fn time_calculation_records_algorithm() {
        let run = time_calculation(&IterativeCalculator::new(), 90).unwrap();
        assert_eq!(run.index, 90);
        assert_eq!(run.algorithm, Algorithm::Iterative);

        let run = time_calculation(&FastDoublingCalculator::new(), 500).unwrap();
        assert_eq!(run.algorithm, Algorithm::FastDoubling);
        assert_eq!(u128::from(run.elapsed_ns()), run.elapsed.as_nanos());
    }

    #[test]
    fn time_compute_uses_registry() {
        let run = time_compute(0, Algorithm::FastDoubling).unwrap();
        assert_eq!(run.index, 0);
        assert_eq!(run.algorithm, Algorithm::FastDoubling);
    }

    #[test]
    fn elapsed_ns_saturates() {
        let run = TimedRun {
            index: 0,
            algorithm: Algorithm::Iterative,
            elapsed: Duration::MAX,
        };
        assert_eq!(run.elapsed_ns(), u64::MAX);
    }
}
