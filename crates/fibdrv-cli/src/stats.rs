//! Outlier filtering for repeated timing runs.
//!
//! Samples whose z-score reaches the threshold are dropped before
//! averaging, matching how the benchmark driver smooths per-index timings.

/// Default z-score threshold.
pub const DEFAULT_Z_THRESHOLD: f64 = 2.0;

/// Arithmetic mean, or `None` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Population standard deviation, or `None` for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn std_dev(samples: &[f64]) -> Option<f64> {
    let m = mean(samples)?;
    let var = samples.iter().map(|x| (x - m).powi(2)).sum::<f64>() / samples.len() as f64;
    Some(var.sqrt())
}

/// Keep samples whose z-score is below `threshold`.
///
/// With zero spread every sample is kept.
#[must_use]
pub fn filter_outliers(samples: &[f64], threshold: f64) -> Vec<f64> {
    let (Some(m), Some(sd)) = (mean(samples), std_dev(samples)) else {
        return Vec::new();
    };
    if sd == 0.0 {
        return samples.to_vec();
    }
    samples
        .iter()
        .copied()
        .filter(|x| ((x - m) / sd).abs() < threshold)
        .collect()
}

/// Mean of the samples that survive [`filter_outliers`].
#[must_use]
pub fn filtered_mean(samples: &[f64], threshold: f64) -> Option<f64> {
    mean(&filter_outliers(samples, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_std_dev() {
        let s = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&s), Some(5.0));
        assert_eq!(std_dev(&s), Some(2.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn spike_is_dropped() {
        let mut s = vec![100.0; 19];
        s.push(10_000.0);
        let kept = filter_outliers(&s, DEFAULT_Z_THRESHOLD);
        assert_eq!(kept.len(), 19);
        assert_eq!(filtered_mean(&s, DEFAULT_Z_THRESHOLD), Some(100.0));
    }

    #[test]
    fn constant_samples_kept() {
        let s = [7.0, 7.0, 7.0];
        assert_eq!(filter_outliers(&s, DEFAULT_Z_THRESHOLD), s.to_vec());
    }

    #[test]
    fn empty_input() {
        assert!(filter_outliers(&[], DEFAULT_Z_THRESHOLD).is_empty());
        assert_eq!(filtered_mean(&[], DEFAULT_Z_THRESHOLD), None);
    }
}
