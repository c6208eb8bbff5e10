//! Percentile Computation
//!
//! Linear interpolation between the two ranks bracketing `p/100 * (n - 1)`.
//! Nothing here reorders the caller's buffer: [`percentile`] sorts a private
//! copy, and [`SortedSamples`] sorts once so that repeated order statistics
//! share one sort.

/// Interpolated percentile over an already sorted slice
fn interpolate(sorted: &[u64], p: f64) -> f64 {
    if !(0.0..=100.0).contains(&p) {
        tracing::warn!(percentile = p, "percentile outside [0, 100], returning 0");
        return 0.0;
    }

    match sorted {
        [] => 0.0,
        [only] => *only as f64,
        _ => {
            let n = sorted.len();
            let rank = p / 100.0 * (n - 1) as f64;
            let lower_idx = rank.floor() as usize;
            let upper_idx = (lower_idx + 1).min(n - 1);
            let fraction = rank - lower_idx as f64;

            let lower = sorted[lower_idx] as f64;
            let upper = sorted[upper_idx] as f64;
            lower + fraction * (upper - lower)
        }
    }
}

/// Compute a single percentile from unsorted samples.
///
/// Returns 0 for empty input and for `p` outside `[0, 100]` (logged).
///
/// # Examples
///
/// ```
/// # use pqcbench_stats::percentile;
/// let samples = [5, 1, 4, 2, 3];
/// assert_eq!(percentile(&samples, 50.0), 3.0);
/// assert_eq!(percentile(&samples, 100.0), 5.0);
/// ```
pub fn percentile(samples: &[u64], p: f64) -> f64 {
    let mut sorted = samples.to_vec();
    sorted.sort_unstable();
    interpolate(&sorted, p)
}

/// Samples sorted once for repeated order statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedSamples {
    sorted: Vec<u64>,
}

impl SortedSamples {
    /// Copy and sort `samples`
    pub fn new(samples: &[u64]) -> Self {
        Self::from_vec(samples.to_vec())
    }

    /// Sort an owned buffer in place
    pub fn from_vec(mut samples: Vec<u64>) -> Self {
        samples.sort_unstable();
        Self { sorted: samples }
    }

    /// Interpolated percentile; see [`percentile`]
    pub fn percentile(&self, p: f64) -> f64 {
        interpolate(&self.sorted, p)
    }

    /// 50th percentile
    pub fn median(&self) -> f64 {
        self.percentile(50.0)
    }

    /// Smallest sample
    pub fn min(&self) -> Option<u64> {
        self.sorted.first().copied()
    }

    /// Largest sample
    pub fn max(&self) -> Option<u64> {
        self.sorted.last().copied()
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Whether there are no samples
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// Sorted view of the samples
    pub fn as_slice(&self) -> &[u64] {
        &self.sorted
    }
}
