//! Limb capacity policy.
//!
//! Every engine sizes its buffers once, up front, from the requested index.
//! `capacity_for` is the empirical sizing rule; `required_limbs` is the
//! analytic worst case it must cover.
//!
//! Bound used by `required_limbs`: for m >= 1, F(m) <= phi^(m-1), so
//! bits(F(m)) <= floor(m * log2(phi)) + 1 with log2(phi) ~ 0.694242. The
//! constant below rounds log2(phi) up to 0.6943. The largest value any
//! engine writes for index n is F(n+1) (the fast-doubling pair ends at
//! (F(n), F(n+1))), and schoolbook products of la- and lb-limb operands
//! touch at most la + lb - 1 limbs, which never exceeds the limb count of
//! the product itself.

use crate::constants::LIMB_BITS;

/// log2(phi) rounded up, as a fraction over [`LOG2_PHI_DENOM`].
const LOG2_PHI_NUM: u128 = 6943;
const LOG2_PHI_DENOM: u128 = 10_000;

/// Empirical capacity rule: `floor((109 * n - 181) / 1000) + 1`.
///
/// Division truncates toward zero, so indices 0..=1 get a single limb.
/// Saturates at `usize::MAX` for indices no machine could allocate for.
#[must_use]
pub fn capacity_for(n: u64) -> usize {
    let scaled = i128::from(n) * 109 - 181;
    let limbs = scaled / 1000 + 1;
    usize::try_from(limbs).unwrap_or(usize::MAX)
}

/// Upper bound on the bit length of F(m).
#[must_use]
pub fn fib_bits_upper_bound(m: u64) -> u64 {
    let bits = u128::from(m) * LOG2_PHI_NUM / LOG2_PHI_DENOM + 1;
    u64::try_from(bits).unwrap_or(u64::MAX)
}

/// Number of limbs needed to hold `bits` bits (at least one).
#[must_use]
pub fn limbs_for_bits(bits: u64) -> usize {
    let limbs = bits.div_ceil(u64::from(LIMB_BITS)).max(1);
    usize::try_from(limbs).unwrap_or(usize::MAX)
}

/// Analytic worst-case limb count touched while computing F(n) with either engine.
#[must_use]
pub fn required_limbs(n: u64) -> usize {
    limbs_for_bits(fib_bits_upper_bound(n.saturating_add(1)))
}

/// Whether the empirical rule covers the analytic bound for `n`.
#[must_use]
pub fn capacity_covers(n: u64) -> bool {
    capacity_for(n) >= required_limbs(n)
}
