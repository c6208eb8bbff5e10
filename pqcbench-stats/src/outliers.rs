//! Outlier Removal
//!
//! Uses the IQR (Interquartile Range) method: samples outside
//! `[Q1 - k*IQR, Q3 + k*IQR]` are dropped, bounds inclusive.
//!
//! A single pass is not idempotent because dropping points moves the
//! quartiles, so the filter repeats until a pass removes nothing or fewer
//! than [`MIN_OUTLIER_SAMPLES`] points remain. The result is a fixed point:
//! filtering it again removes nothing.

use crate::percentiles::SortedSamples;

/// Fewest samples for which the IQR is considered meaningful
pub const MIN_OUTLIER_SAMPLES: usize = 4;

/// Default IQR multiplier
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Result of outlier removal
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierAnalysis {
    /// Samples kept, in their original order
    pub retained: Vec<u64>,
    /// Number of low outliers (below lower bound)
    pub low_outlier_count: usize,
    /// Number of high outliers (above upper bound)
    pub high_outlier_count: usize,
    /// Lower bound of the final pass
    pub lower_bound: f64,
    /// Upper bound of the final pass
    pub upper_bound: f64,
    /// Filter passes that removed at least one sample
    pub passes: usize,
}

impl OutlierAnalysis {
    fn unchanged(samples: &[u64]) -> Self {
        Self {
            retained: samples.to_vec(),
            low_outlier_count: 0,
            high_outlier_count: 0,
            lower_bound: f64::NEG_INFINITY,
            upper_bound: f64::INFINITY,
            passes: 0,
        }
    }

    /// Total samples removed
    pub fn removed(&self) -> usize {
        self.low_outlier_count + self.high_outlier_count
    }

    /// Number of samples kept
    pub fn retained_count(&self) -> usize {
        self.retained.len()
    }

    /// Percentage of the input that was removed
    pub fn outlier_percentage(&self) -> f64 {
        let total = self.retained.len() + self.removed();
        if total == 0 {
            return 0.0;
        }
        self.removed() as f64 / total as f64 * 100.0
    }
}

/// IQR bounds of `samples`
fn iqr_bounds(samples: &[u64], multiplier: f64) -> (f64, f64) {
    let sorted = SortedSamples::new(samples);
    let q1 = sorted.percentile(25.0);
    let q3 = sorted.percentile(75.0);
    let iqr = q3 - q1;
    (q1 - multiplier * iqr, q3 + multiplier * iqr)
}

/// Remove outliers from `samples` using the IQR method.
///
/// No-op below [`MIN_OUTLIER_SAMPLES`] points and for a negative or
/// non-finite multiplier (logged). The caller's buffer is left untouched.
///
/// # Examples
///
/// ```
/// # use pqcbench_stats::remove_outliers;
/// let mut samples = vec![10; 11];
/// samples.push(1000);
/// let analysis = remove_outliers(&samples, 1.5);
/// assert_eq!(analysis.retained_count(), 11);
/// assert_eq!(analysis.high_outlier_count, 1);
/// ```
pub fn remove_outliers(samples: &[u64], multiplier: f64) -> OutlierAnalysis {
    if !multiplier.is_finite() || multiplier < 0.0 {
        tracing::warn!(multiplier, "invalid IQR multiplier, outlier removal skipped");
        return OutlierAnalysis::unchanged(samples);
    }

    let mut analysis = OutlierAnalysis::unchanged(samples);

    while analysis.retained.len() >= MIN_OUTLIER_SAMPLES {
        let (lower, upper) = iqr_bounds(&analysis.retained, multiplier);
        analysis.lower_bound = lower;
        analysis.upper_bound = upper;

        let before = analysis.retained.len();
        let mut low = 0;
        let mut high = 0;
        analysis.retained.retain(|&s| {
            let v = s as f64;
            if v < lower {
                low += 1;
                false
            } else if v > upper {
                high += 1;
                false
            } else {
                true
            }
        });

        if analysis.retained.len() == before {
            break;
        }
        analysis.low_outlier_count += low;
        analysis.high_outlier_count += high;
        analysis.passes += 1;
    }

    if analysis.removed() > 0 {
        tracing::debug!(
            removed = analysis.removed(),
            retained = analysis.retained_count(),
            passes = analysis.passes,
            "outliers removed"
        );
    }

    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_high_outlier() {
        let mut samples = vec![10; 11];
        samples.push(1000);
        let result = remove_outliers(&samples, DEFAULT_IQR_MULTIPLIER);

        assert_eq!(result.retained_count(), 11);
        assert_eq!(result.high_outlier_count, 1);
        assert_eq!(result.low_outlier_count, 0);
        assert!(result.retained.iter().all(|&s| s == 10));
    }

    #[test]
    fn test_no_outliers() {
        let samples = vec![1, 2, 3, 4, 5];
        let result = remove_outliers(&samples, DEFAULT_IQR_MULTIPLIER);

        assert_eq!(result.removed(), 0);
        assert_eq!(result.retained, samples);
        assert_eq!(result.passes, 0);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        // Q1 = 2, Q3 = 4, IQR = 2, bounds with k = 0.5 are [1, 5]
        let samples = vec![1, 2, 3, 4, 5];
        let result = remove_outliers(&samples, 0.5);
        assert_eq!(result.retained, samples);
        assert!((result.lower_bound - 1.0).abs() < f64::EPSILON);
        assert!((result.upper_bound - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_too_few_samples_is_noop() {
        let samples = vec![1, 2, 1_000_000];
        let result = remove_outliers(&samples, DEFAULT_IQR_MULTIPLIER);
        assert_eq!(result.retained, samples);
        assert_eq!(result.removed(), 0);
    }

    #[test]
    fn test_empty_samples() {
        let result = remove_outliers(&[], DEFAULT_IQR_MULTIPLIER);
        assert!(result.retained.is_empty());
        assert_eq!(result.outlier_percentage(), 0.0);
    }

    #[test]
    fn test_order_preserved() {
        let samples = vec![12, 10, 5000, 11, 10, 13, 12, 11];
        let result = remove_outliers(&samples, DEFAULT_IQR_MULTIPLIER);
        assert_eq!(result.retained, vec![12, 10, 11, 10, 13, 12, 11]);
    }

    #[test]
    fn test_second_application_is_noop() {
        let samples = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 40, 80, 400];
        let first = remove_outliers(&samples, DEFAULT_IQR_MULTIPLIER);
        let second = remove_outliers(&first.retained, DEFAULT_IQR_MULTIPLIER);
        assert_eq!(second.removed(), 0);
        assert_eq!(second.retained, first.retained);
    }

    #[test]
    fn test_invalid_multiplier_is_noop() {
        let samples = vec![10, 10, 10, 10, 1000];
        assert_eq!(remove_outliers(&samples, -1.0).removed(), 0);
        assert_eq!(remove_outliers(&samples, f64::NAN).removed(), 0);
    }

    #[test]
    fn test_outlier_percentage() {
        let samples = vec![1, 2, 3, 4, 5, 100];
        let result = remove_outliers(&samples, DEFAULT_IQR_MULTIPLIER);

        // 1 out of 6 = ~16.7%
        assert_eq!(result.removed(), 1);
        assert!(result.outlier_percentage() > 15.0);
        assert!(result.outlier_percentage() < 20.0);
    }
}
