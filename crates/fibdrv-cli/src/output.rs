//! Output formatting.

use std::time::Duration;

/// Shorten a long decimal string to its head and tail unless `verbose`.
#[must_use]
pub fn format_digits(digits: &str, verbose: bool) -> String {
    if !verbose && digits.len() > 100 {
        format!(
            "{}...{} ({} digits)",
            &digits[..50],
            &digits[digits.len() - 50..],
            digits.len()
        )
    } else {
        digits.to_string()
    }
}

/// Format a duration for display.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos < 1_000 {
        format!("{nanos}ns")
    } else if nanos < 1_000_000 {
        format!("{:.2}µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2}ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}
