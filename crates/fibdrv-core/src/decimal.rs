//! Decimal rendering of base-2^64 limbs.
//!
//! Repeated long division by 10^19 peels one 19-digit group per pass. The
//! most significant group prints without leading zeros, every other group is
//! zero-padded to 19 digits.

use crate::calculator::FibError;
use crate::constants::{DECIMAL_DIVISOR, DECIMAL_GROUP_DIGITS};

/// Render little-endian limbs as a decimal string.
///
/// Leading zero limbs are ignored; an empty slice is an error rather than
/// silently producing nothing.
///
/// # Example
/// ```
/// use fibdrv_core::decimal::format_decimal;
///
/// assert_eq!(format_decimal(&[55]).unwrap(), "55");
/// assert_eq!(format_decimal(&[0, 1]).unwrap(), "18446744073709551616");
/// assert!(format_decimal(&[]).is_err());
/// ```
pub fn format_decimal(limbs: &[u64]) -> Result<String, FibError> {
    let groups = decimal_groups(limbs)?;
    let mut out = String::with_capacity(groups.len() * DECIMAL_GROUP_DIGITS);
    let mut iter = groups.iter().rev();
    if let Some(top) = iter.next() {
        out.push_str(&top.to_string());
    }
    for group in iter {
        out.push_str(&format!("{group:0width$}", width = DECIMAL_GROUP_DIGITS));
    }
    Ok(out)
}

/// Render limbs the way the client displays a read: decimal digits followed
/// by a period.
pub fn format_display(limbs: &[u64]) -> Result<String, FibError> {
    let mut text = format_decimal(limbs)?;
    text.push('.');
    Ok(text)
}

/// Split a value into base-10^19 groups, least significant first.
///
/// Works on a scratch copy one limb wider than the input. Each pass divides
/// the remaining significant limbs from the top down using a 128-bit
/// `(remainder << 64) | limb` intermediate; the final remainder of the pass
/// is the next group. The significant length shrinks as top quotient limbs
/// become zero, and the loop ends once the value is zero.
#[allow(clippy::cast_possible_truncation)]
pub fn decimal_groups(limbs: &[u64]) -> Result<Vec<u64>, FibError> {
    if limbs.is_empty() {
        return Err(FibError::EmptyInput);
    }

    let mut scratch = Vec::with_capacity(limbs.len() + 1);
    scratch.extend_from_slice(limbs);
    scratch.push(0);
    let mut len = significant(&scratch);

    let divisor = u128::from(DECIMAL_DIVISOR);
    let mut groups = Vec::new();
    loop {
        let mut remainder: u128 = 0;
        for limb in scratch[..len].iter_mut().rev() {
            let wide = (remainder << 64) | u128::from(*limb);
            // remainder < 10^19, so the quotient fits in one limb.
            *limb = (wide / divisor) as u64;
            remainder = wide % divisor;
        }
        groups.push(remainder as u64);

        while len > 0 && scratch[len - 1] == 0 {
            len -= 1;
        }
        if len == 0 {
            break;
        }
    }
    Ok(groups)
}

fn significant(limbs: &[u64]) -> usize {
    limbs.iter().rposition(|&limb| limb != 0).map_or(0, |i| i + 1)
}
