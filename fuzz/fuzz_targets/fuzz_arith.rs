#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint::BigUint;

use fibdrv_core::arith::{add, multiply, subtract};
use fibdrv_core::BigNum;

const CAP: usize = 16;

fn to_biguint(value: &BigNum) -> BigUint {
    BigUint::from_bytes_le(&value.to_le_bytes())
}

fuzz_target!(|data: &[u8]| {
    // Split the input into two operands of at most 6 limbs each.
    let mid = data.len() / 2;
    let (lhs, rhs) = data.split_at(mid);
    if lhs.len() > 48 || rhs.len() > 48 {
        return;
    }
    let (Ok(a), Ok(b)) = (BigNum::from_le_bytes(CAP, lhs), BigNum::from_le_bytes(CAP, rhs)) else {
        return;
    };
    let (ra, rb) = (to_biguint(&a), to_biguint(&b));

    let mut sum = BigNum::new(CAP).unwrap();
    add(&mut sum, &a, &b);
    assert_eq!(to_biguint(&sum), &ra + &rb);

    let mut product = BigNum::new(CAP).unwrap();
    multiply(&mut product, &a, &b);
    assert_eq!(to_biguint(&product), &ra * &rb);

    let mut diff = BigNum::new(CAP).unwrap();
    let order = subtract(&mut diff, &a, &b);
    let expected = if ra >= rb { &ra - &rb } else { &rb - &ra };
    assert_eq!(to_biguint(&diff), expected);
    assert_eq!(order, ra.cmp(&rb));
});
