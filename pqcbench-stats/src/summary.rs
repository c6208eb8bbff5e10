//! Summary Statistics
//!
//! Reduces one sample set (nanoseconds) to mean, median, standard deviation,
//! min, max, p95 and p99. Mean and standard deviation are order-independent
//! and read the samples as given; the order statistics come from a single
//! sorted copy.

use crate::percentiles::SortedSamples;
use serde::{Deserialize, Serialize};

/// Summary of one sample set, all values in nanoseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Arithmetic mean
    pub mean: f64,
    /// Median (P50)
    pub median: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Smallest sample
    pub min: f64,
    /// Largest sample
    pub max: f64,
    /// 95th percentile
    pub p95: f64,
    /// 99th percentile
    pub p99: f64,
    /// Number of samples summarized
    pub sample_count: usize,
}

impl SummaryStatistics {
    /// Coefficient of variation (relative stddev)
    pub fn coefficient_of_variation(&self) -> f64 {
        if self.mean == 0.0 {
            0.0
        } else {
            (self.std_dev / self.mean) * 100.0
        }
    }
}

/// Arithmetic mean; 0 for empty input
pub fn mean(samples: &[u64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    // Sum in f64 so very large sample sets cannot overflow u64
    let sum: f64 = samples.iter().map(|&s| s as f64).sum();
    sum / samples.len() as f64
}

/// Sample standard deviation (denominator `n - 1`); 0 when `n < 2`.
///
/// `mean` is used as given when `Some`, otherwise it is computed here. A
/// supplied mean of zero is taken at face value.
pub fn std_dev(samples: &[u64], mean: Option<f64>) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 0.0;
    }
    let mean = mean.unwrap_or_else(|| self::mean(samples));
    let variance = samples
        .iter()
        .map(|&s| {
            let d = s as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / (n - 1) as f64;
    variance.sqrt()
}

/// Compute every summary statistic for `samples`.
///
/// Empty input yields an all-zero summary.
pub fn calculate(samples: &[u64]) -> SummaryStatistics {
    if samples.is_empty() {
        return SummaryStatistics::default();
    }

    // Order-independent moments first, from the caller's view
    let mean = mean(samples);
    let std_dev = std_dev(samples, Some(mean));

    let sorted = SortedSamples::new(samples);

    SummaryStatistics {
        mean,
        median: sorted.median(),
        std_dev,
        min: sorted.min().unwrap_or(0) as f64,
        max: sorted.max().unwrap_or(0) as f64,
        p95: sorted.percentile(95.0),
        p99: sorted.percentile(99.0),
        sample_count: samples.len(),
    }
}
