//! Golden file integration tests.
//!
//! Reads tests/testdata/fibonacci_golden.json and checks both engines, the
//! device read path, and the decimal renderer against known values.

use num_bigint::BigUint;
use serde::Deserialize;

use fibdrv_core::bignum::limbs_from_le_bytes;
use fibdrv_core::decimal::{format_decimal, format_display};
use fibdrv_core::fastdoubling::FastDoublingCalculator;
use fibdrv_core::iterative::IterativeCalculator;
use fibdrv_core::{Algorithm, BigNum, Calculator, MAX_INDEX};
use fibdrv_device::{FibDevice, Whence};

// ---------------------------------------------------------------------------
// Golden data structures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct GoldenData {
    #[allow(dead_code)]
    description: String,
    values: Vec<GoldenEntry>,
}

#[derive(Deserialize)]
struct GoldenEntry {
    n: u64,
    fib: String,
    limbs: usize,
    bits: u64,
}

fn load_golden_data() -> GoldenData {
    let path = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/testdata/fibonacci_golden.json"
    );
    let data = std::fs::read_to_string(path).expect("failed to read golden file");
    serde_json::from_str(&data).expect("failed to parse golden JSON")
}

fn check(name: &str, entry: &GoldenEntry, value: &BigNum) {
    assert_eq!(value.to_string(), entry.fib, "{name} mismatch at n={}", entry.n);
    assert_eq!(value.len(), entry.limbs, "{name} limb count at n={}", entry.n);
    assert_eq!(value.bits(), entry.bits, "{name} bit length at n={}", entry.n);
}

// ---------------------------------------------------------------------------
// Golden: exact values, both engines
// ---------------------------------------------------------------------------

#[test]
fn golden_exact_iterative() {
    let calc = IterativeCalculator::new();
    for entry in &load_golden_data().values {
        check("Iterative", entry, &calc.calculate(entry.n).unwrap());
    }
}

#[test]
fn golden_exact_fast_doubling() {
    let calc = FastDoublingCalculator::new();
    for entry in &load_golden_data().values {
        check("FastDoubling", entry, &calc.calculate(entry.n).unwrap());
    }
}

#[test]
fn golden_matches_reference() {
    for entry in &load_golden_data().values {
        let value = fibdrv_core::fibonacci(entry.n);
        let reference = BigUint::from_bytes_le(&value.to_le_bytes());
        assert_eq!(reference.to_string(), entry.fib, "n={}", entry.n);
    }
}

// ---------------------------------------------------------------------------
// Golden: through the device
// ---------------------------------------------------------------------------

#[test]
fn golden_device_readback() {
    let device = FibDevice::new();
    let mut buf = vec![0u8; device.max_read_len()];
    for algorithm in Algorithm::ALL {
        let mut session = device.open().unwrap();
        session.set_read_algorithm(algorithm);
        for entry in load_golden_data().values.iter().filter(|e| e.n <= MAX_INDEX) {
            let position = session.seek(i64::try_from(entry.n).unwrap(), Whence::Set);
            assert_eq!(position, entry.n);
            let read = session.read(&mut buf).unwrap();
            assert_eq!(read, entry.limbs * 8, "{algorithm} bytes at n={}", entry.n);

            let limbs = limbs_from_le_bytes(&buf[..read]);
            assert_eq!(format_decimal(&limbs).unwrap(), entry.fib);
            assert_eq!(format_display(&limbs).unwrap(), format!("{}.", entry.fib));
        }
    }
}

#[test]
fn golden_value_at_device_maximum() {
    let data = load_golden_data();
    let entry = data
        .values
        .iter()
        .find(|e| e.n == MAX_INDEX)
        .expect("golden file covers the device maximum");
    assert_eq!(entry.fib.len(), 105);
    assert_eq!(entry.limbs, 6);
}
