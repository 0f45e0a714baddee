//! Property-based tests for the client-facing computation path.

use num_bigint::BigUint;
use proptest::prelude::*;

use fibdrv_core::bignum::limbs_from_le_bytes;
use fibdrv_core::{compute, Algorithm};
use fibdrv_device::{FibDevice, Whence};
use fibdrv_lib::errors::exit_code_for;

fn reference(n: u64) -> BigUint {
    let (mut a, mut b) = (BigUint::from(0u32), BigUint::from(1u32));
    for _ in 0..n {
        let next = &a + &b;
        a = std::mem::replace(&mut b, next);
    }
    a
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Both engines match an independent big-integer reference, including
    /// indices beyond the device's range.
    #[test]
    fn engines_match_reference(n in 0u64..2000) {
        let index = i64::try_from(n).unwrap();
        let expected = reference(n).to_string();
        let iterative = compute(index, Algorithm::Iterative).unwrap().to_string();
        let fast = compute(index, Algorithm::FastDoubling).unwrap().to_string();
        prop_assert_eq!(iterative, expected.clone());
        prop_assert_eq!(fast, expected);
    }

    /// Raw device bytes decode to the same value the client prints.
    #[test]
    fn device_bytes_decode(n in 0u64..=500) {
        let device = FibDevice::new();
        let mut session = device.open().unwrap();
        session.seek(i64::try_from(n).unwrap(), Whence::Set);
        let mut buf = vec![0u8; device.max_read_len()];
        let read = session.read(&mut buf).unwrap();
        let limbs = limbs_from_le_bytes(&buf[..read]);
        let bytes: Vec<u8> = limbs.iter().flat_map(|limb| limb.to_le_bytes()).collect();
        prop_assert_eq!(BigUint::from_bytes_le(&bytes), reference(n));
    }

    /// Negative indices always map to the generic exit code.
    #[test]
    fn negative_index_exit_code(index in i64::MIN..0) {
        let err = anyhow::Error::new(compute(index, Algorithm::FastDoubling).unwrap_err());
        prop_assert_eq!(exit_code_for(&err), 1);
    }
}
