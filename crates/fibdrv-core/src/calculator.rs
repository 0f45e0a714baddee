//! Calculator trait, algorithm selection, and the shared error type.
//!
//! `Calculator` is implemented by both engines and consumed by the device
//! and the client. `Algorithm` names an engine and knows how the device
//! encodes it as a write byte-count.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::bignum::BigNum;
use crate::progress::CancellationToken;

/// Error type for Fibonacci calculations and limb buffers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FibError {
    /// A limb buffer was requested with zero capacity.
    #[error("invalid capacity: a limb buffer needs at least one limb")]
    InvalidCapacity,

    /// The limb buffer could not be allocated.
    #[error("failed to allocate {limbs} limbs")]
    Allocation {
        /// Requested limb count.
        limbs: usize,
    },

    /// A negative Fibonacci index was requested.
    #[error("invalid index {0}: Fibonacci index must be non-negative")]
    InvalidIndex(i64),

    /// A value does not fit in the destination buffer.
    #[error("capacity exceeded: value needs {needed} limbs, buffer holds {capacity}")]
    CapacityExceeded {
        /// Significant limbs of the value.
        needed: usize,
        /// Capacity of the destination.
        capacity: usize,
    },

    /// The decimal renderer was handed no limbs.
    #[error("empty input: nothing to render")]
    EmptyInput,

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Calculation was cancelled.
    #[error("calculation cancelled")]
    Cancelled,

    /// The two engines produced different values.
    #[error("result mismatch between algorithms at index {index}")]
    Mismatch {
        /// Index at which the engines disagreed.
        index: u64,
    },
}

/// The two Fibonacci engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Linear accumulator, O(n) additions.
    Iterative,
    /// Fast doubling, O(log n) rounds of multiplications.
    FastDoubling,
}

impl Algorithm {
    /// Both algorithms, in device selector order.
    pub const ALL: [Algorithm; 2] = [Algorithm::Iterative, Algorithm::FastDoubling];

    /// Decode the device's byte-count selector: 0 is iterative, 1 is fast doubling.
    #[must_use]
    pub fn from_selector(selector: usize) -> Option<Self> {
        match selector {
            0 => Some(Self::Iterative),
            1 => Some(Self::FastDoubling),
            _ => None,
        }
    }

    /// The byte-count that selects this algorithm on a device write.
    #[must_use]
    pub fn selector(self) -> usize {
        match self {
            Self::Iterative => 0,
            Self::FastDoubling => 1,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Iterative => "Iterative",
            Self::FastDoubling => "FastDoubling",
        }
    }

    /// Stem of this algorithm's default timing file.
    #[must_use]
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::Iterative => "iterative",
            Self::FastDoubling => "fast_doubling",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = FibError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "iterative" | "iter" | "sequence" => Ok(Self::Iterative),
            "fast" | "fastdoubling" | "fast-doubling" | "fast_doubling" => Ok(Self::FastDoubling),
            other => Err(FibError::Config(format!("unknown algorithm: {other}"))),
        }
    }
}

/// Trait implemented by the Fibonacci engines.
pub trait Calculator: Send + Sync {
    /// Calculate F(n), checking `cancel` once per iteration.
    fn calculate_with_cancel(&self, cancel: &CancellationToken, n: u64)
        -> Result<BigNum, FibError>;

    /// Which algorithm this calculator runs.
    fn algorithm(&self) -> Algorithm;

    /// Calculate F(n) to completion.
    fn calculate(&self, n: u64) -> Result<BigNum, FibError> {
        self.calculate_with_cancel(&CancellationToken::new(), n)
    }

    /// Get the name of this calculator.
    fn name(&self) -> &'static str {
        self.algorithm().name()
    }
}
