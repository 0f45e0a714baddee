//! Arithmetic kernel over [`BigNum`] operands.
//!
//! Destinations are `&mut` and operands are `&`, so a destination can never
//! alias an operand; the in-place forms cover `x = x op y`. Carries and
//! borrows are decided with explicit unsigned overflow checks. Every
//! operation leaves its destination renormalized, and running past the
//! destination's capacity panics.

use std::cmp::Ordering;

use crate::bignum::BigNum;

/// `dst = a + b`.
///
/// The longer operand bounds the loop; the caller's operands are not
/// touched. `dst.len()` becomes the longer length, plus one if a carry
/// escapes the top limb.
///
/// # Example
/// ```
/// use fibdrv_core::{arith, BigNum};
///
/// let a = BigNum::from_u64(2, u64::MAX).unwrap();
/// let b = BigNum::from_u64(2, 1).unwrap();
/// let mut sum = BigNum::new(2).unwrap();
/// arith::add(&mut sum, &a, &b);
/// assert_eq!(sum.limbs(), &[0, 1]);
/// ```
#[track_caller]
pub fn add(dst: &mut BigNum, a: &BigNum, b: &BigNum) {
    let (longer, shorter) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let width = longer.len();
    dst.ensure_capacity(width);

    let out = dst.limbs_mut();
    let mut carry = false;
    for (i, &x) in longer.limbs().iter().enumerate() {
        let (partial, c1) = x.overflowing_add(shorter.limb(i));
        let (sum, c2) = partial.overflowing_add(u64::from(carry));
        out[i] = sum;
        carry = c1 || c2;
    }

    let written = if carry {
        dst.ensure_capacity(width + 1);
        dst.limbs_mut()[width] = 1;
        width + 1
    } else {
        width
    };
    dst.finish(written);
}

/// `acc += rhs`.
#[track_caller]
pub fn add_assign(acc: &mut BigNum, rhs: &BigNum) {
    let width = acc.len().max(rhs.len());
    acc.ensure_capacity(width);

    let out = acc.limbs_mut();
    let mut carry = false;
    for (i, slot) in out.iter_mut().enumerate().take(width) {
        let (partial, c1) = slot.overflowing_add(rhs.limb(i));
        let (sum, c2) = partial.overflowing_add(u64::from(carry));
        *slot = sum;
        carry = c1 || c2;
    }

    let written = if carry {
        acc.ensure_capacity(width + 1);
        acc.limbs_mut()[width] = 1;
        width + 1
    } else {
        width
    };
    acc.finish(written);
}

/// `dst = |a - b|`, returning how `a` compares to `b`.
///
/// The result is never negative: when `b > a` the kernel computes `b - a`
/// and reports `Ordering::Less` so the caller knows which operand was
/// larger.
#[track_caller]
pub fn subtract(dst: &mut BigNum, a: &BigNum, b: &BigNum) -> Ordering {
    let order = a.cmp(b);
    let (larger, smaller) = if order == Ordering::Less { (b, a) } else { (a, b) };
    let width = larger.len();
    dst.ensure_capacity(width);

    let out = dst.limbs_mut();
    let mut borrow = false;
    for (i, &x) in larger.limbs().iter().enumerate() {
        let (partial, b1) = x.overflowing_sub(smaller.limb(i));
        let (diff, b2) = partial.overflowing_sub(u64::from(borrow));
        out[i] = diff;
        borrow = b1 || b2;
    }
    debug_assert!(!borrow, "larger operand must absorb every borrow");

    dst.finish(width);
    order
}

/// `acc = |acc - rhs|`, returning how the old `acc` compared to `rhs`.
#[track_caller]
pub fn sub_assign(acc: &mut BigNum, rhs: &BigNum) -> Ordering {
    let order = (*acc).cmp(rhs);
    let width = acc.len().max(rhs.len());
    acc.ensure_capacity(width);

    let acc_is_larger = order != Ordering::Less;
    let out = acc.limbs_mut();
    let mut borrow = false;
    for (i, slot) in out.iter_mut().enumerate().take(width) {
        let (x, y) = if acc_is_larger {
            (*slot, rhs.limb(i))
        } else {
            (rhs.limb(i), *slot)
        };
        let (partial, b1) = x.overflowing_sub(y);
        let (diff, b2) = partial.overflowing_sub(u64::from(borrow));
        *slot = diff;
        borrow = b1 || b2;
    }
    debug_assert!(!borrow, "larger operand must absorb every borrow");

    acc.finish(width);
    order
}

/// `dst = a * b`, schoolbook.
///
/// For each limb `b[i]` the whole of `a` is multiplied in 128-bit
/// arithmetic and accumulated into `dst` at offset `i`; the carry left after
/// the last limb of `a` lands in `dst[a.len() + i]`. The destination is
/// cleared first, so a reused scratch buffer needs no preparation.
#[track_caller]
#[allow(clippy::cast_possible_truncation)]
pub fn multiply(dst: &mut BigNum, a: &BigNum, b: &BigNum) {
    dst.set_zero();
    if a.is_zero() || b.is_zero() {
        return;
    }
    // A product of la- and lb-limb operands spans la + lb - 1 limbs plus a
    // possible final carry limb.
    dst.ensure_capacity(a.len() + b.len() - 1);

    let out = dst.limbs_mut();
    for (i, &bi) in b.limbs().iter().enumerate() {
        let mut carry: u64 = 0;
        for (j, &aj) in a.limbs().iter().enumerate() {
            let wide = u128::from(aj) * u128::from(bi) + u128::from(out[i + j]) + u128::from(carry);
            out[i + j] = wide as u64;
            carry = (wide >> 64) as u64;
        }
        if carry != 0 {
            let slot = a.len() + i;
            assert!(
                slot < out.len(),
                "limb capacity exceeded: operation needs {} limbs, buffer holds {}",
                slot + 1,
                out.len()
            );
            out[slot] = carry;
        }
    }
    dst.normalize();
}

/// `dst = a * a`.
#[track_caller]
pub fn square(dst: &mut BigNum, a: &BigNum) {
    multiply(dst, a, a);
}

/// `dst = a << 1`: each limb's top bit carries into the next limb.
#[track_caller]
pub fn double_shift(dst: &mut BigNum, a: &BigNum) {
    let width = a.len();
    dst.ensure_capacity(width);

    let out = dst.limbs_mut();
    let mut carry = 0u64;
    for (i, &x) in a.limbs().iter().enumerate() {
        out[i] = (x << 1) | carry;
        carry = x >> 63;
    }

    let written = if carry != 0 {
        dst.ensure_capacity(width + 1);
        dst.limbs_mut()[width] = 1;
        width + 1
    } else {
        width
    };
    dst.finish(written);
}
