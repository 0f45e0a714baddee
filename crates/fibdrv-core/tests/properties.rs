//! Property-based tests for the arithmetic kernel and the engines.
//!
//! `num-bigint` serves as the independent reference implementation.

use std::cmp::Ordering;

use num_bigint::BigUint;
use proptest::prelude::*;

use fibdrv_core::arith;
use fibdrv_core::calculator::Calculator;
use fibdrv_core::decimal::format_decimal;
use fibdrv_core::fastdoubling::FastDoublingCalculator;
use fibdrv_core::iterative::IterativeCalculator;
use fibdrv_core::BigNum;

const CAP: usize = 16;

fn limbs_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(any::<u64>(), 1..6)
}

fn num(limbs: &[u64]) -> BigNum {
    BigNum::from_limbs(CAP, limbs).unwrap()
}

fn reference(value: &BigNum) -> BigUint {
    let digits: Vec<u32> = value
        .limbs()
        .iter()
        .flat_map(|&limb| [limb as u32, (limb >> 32) as u32])
        .collect();
    BigUint::new(digits)
}

fn sum(a: &BigNum, b: &BigNum) -> BigNum {
    let mut dst = BigNum::new(CAP).unwrap();
    arith::add(&mut dst, a, b);
    dst
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn add_is_commutative(a in limbs_strategy(), b in limbs_strategy()) {
        let (a, b) = (num(&a), num(&b));
        prop_assert_eq!(sum(&a, &b), sum(&b, &a));
    }

    #[test]
    fn add_is_associative(a in limbs_strategy(), b in limbs_strategy(), c in limbs_strategy()) {
        let (a, b, c) = (num(&a), num(&b), num(&c));
        prop_assert_eq!(sum(&sum(&a, &b), &c), sum(&a, &sum(&b, &c)));
    }

    #[test]
    fn add_matches_reference(a in limbs_strategy(), b in limbs_strategy()) {
        let (a, b) = (num(&a), num(&b));
        prop_assert_eq!(reference(&sum(&a, &b)), reference(&a) + reference(&b));
    }

    #[test]
    fn add_assign_matches_add(a in limbs_strategy(), b in limbs_strategy()) {
        let (a, b) = (num(&a), num(&b));
        let mut acc = a.clone();
        arith::add_assign(&mut acc, &b);
        prop_assert_eq!(acc, sum(&a, &b));
    }

    #[test]
    fn subtract_then_add_reconstructs(a in limbs_strategy(), b in limbs_strategy()) {
        let (x, y) = (num(&a), num(&b));
        let (big, small) = if x >= y { (x, y) } else { (y, x) };

        let mut diff = BigNum::new(CAP).unwrap();
        let order = arith::subtract(&mut diff, &big, &small);
        prop_assert_ne!(order, Ordering::Less);
        prop_assert_eq!(sum(&diff, &small), big);
    }

    #[test]
    fn subtract_is_absolute_difference(a in limbs_strategy(), b in limbs_strategy()) {
        let (a, b) = (num(&a), num(&b));
        let mut forward = BigNum::new(CAP).unwrap();
        let mut backward = BigNum::new(CAP).unwrap();
        let order = arith::subtract(&mut forward, &a, &b);
        let reverse = arith::subtract(&mut backward, &b, &a);
        prop_assert_eq!(order, reverse.reverse());
        prop_assert_eq!(&forward, &backward);

        let mut acc = a.clone();
        prop_assert_eq!(arith::sub_assign(&mut acc, &b), order);
        prop_assert_eq!(acc, forward);
    }

    #[test]
    fn multiply_decimal_matches_reference(a in limbs_strategy(), b in limbs_strategy()) {
        let (a, b) = (num(&a), num(&b));
        let mut product = BigNum::new(CAP).unwrap();
        arith::multiply(&mut product, &a, &b);

        let expected = reference(&a) * reference(&b);
        prop_assert_eq!(format_decimal(product.limbs()).unwrap(), expected.to_string());
    }

    #[test]
    fn double_shift_equals_self_add(a in limbs_strategy()) {
        let a = num(&a);
        let mut doubled = BigNum::new(CAP).unwrap();
        arith::double_shift(&mut doubled, &a);
        prop_assert_eq!(doubled, sum(&a, &a));
    }

    #[test]
    fn decimal_matches_reference(a in limbs_strategy()) {
        let a = num(&a);
        prop_assert_eq!(a.to_string(), reference(&a).to_string());
    }

    #[test]
    fn engines_agree(n in 0u64..=500) {
        let iterative = IterativeCalculator::new().calculate(n).unwrap();
        let fast = FastDoublingCalculator::new().calculate(n).unwrap();
        prop_assert_eq!(iterative, fast, "F({}) iterative != fast doubling", n);
    }
}

/// Every supported index, exhaustively, limb for limb.
#[test]
fn engines_agree_on_full_device_range() {
    let iterative = IterativeCalculator::new();
    let fast = FastDoublingCalculator::new();
    for n in 0..=500 {
        let a = iterative.calculate(n).unwrap();
        let b = fast.calculate(n).unwrap();
        assert_eq!(a.limbs(), b.limbs(), "F({n})");
    }
}

/// F(n) + F(n+1) == F(n+2) across the device range.
#[test]
fn recurrence_holds() {
    let fast = FastDoublingCalculator::new();
    for n in 0..=498 {
        let f0 = fast.calculate(n).unwrap();
        let f1 = fast.calculate(n + 1).unwrap();
        let f2 = fast.calculate(n + 2).unwrap();
        let mut next = BigNum::new(f2.capacity()).unwrap();
        arith::add(&mut next, &f0, &f1);
        assert_eq!(next, f2, "F({n}) + F({}) != F({})", n + 1, n + 2);
    }
}
