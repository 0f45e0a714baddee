//! Constants shared by the arithmetic kernel, the engines, and the device.

/// Largest index the device surface accepts; seeks are clamped to this.
pub const MAX_INDEX: u64 = 500;

/// Width of one limb in bits.
pub const LIMB_BITS: u32 = u64::BITS;

/// Width of one limb in bytes, as transferred by raw reads.
pub const LIMB_BYTES: usize = std::mem::size_of::<u64>();

/// Largest power of ten that fits in a limb: each division step of the
/// decimal renderer peels off one group of this size.
pub const DECIMAL_DIVISOR: u64 = 10_000_000_000_000_000_000;

/// Number of decimal digits in one group produced by [`DECIMAL_DIVISOR`].
pub const DECIMAL_GROUP_DIGITS: usize = 19;

/// Precomputed Fibonacci values for n = 0..=93, used as test oracles.
///
/// F(93) = 12,200,160,415,121,876,738 is the largest Fibonacci number
/// that fits in `u64`.
pub const FIB_TABLE: [u64; 94] = {
    let mut table = [0u64; 94];
    table[1] = 1;
    let mut i = 2;
    while i < 94 {
        table[i] = table[i - 1] + table[i - 2];
        i += 1;
    }
    table
};

/// Process exit codes used by the client binary.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// The two engines disagreed on a value.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Another session holds the device (matches `EBUSY`).
    pub const ERROR_BUSY: i32 = 16;
    /// Sweep cancelled by user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
