#![no_main]

use libfuzzer_sys::fuzz_target;

use fibdrv_core::fastdoubling::FastDoublingCalculator;
use fibdrv_core::iterative::IterativeCalculator;
use fibdrv_core::{Calculator, MAX_INDEX};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // First 2 bytes pick the index, folded into the device range.
    let n = u64::from(u16::from_le_bytes([data[0], data[1]])) % (MAX_INDEX + 1);

    let iterative = IterativeCalculator::new().calculate(n).unwrap();
    let fast = FastDoublingCalculator::new().calculate(n).unwrap();
    assert_eq!(iterative, fast, "Iterative != FastDoubling at n={n}");
    assert_eq!(iterative.to_string(), fast.to_string());
});
