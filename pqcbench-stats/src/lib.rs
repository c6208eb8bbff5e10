#![warn(missing_docs)]
//! PQCBench Statistical Engine
//!
//! Descriptive statistics over one latency sample set at a time:
//! - Mean and sample standard deviation
//! - Percentiles by linear interpolation, sorting once per sample set
//! - IQR outlier removal that leaves the caller's buffer untouched
//!
//! Inputs are nanosecond counts (`u64`); outputs are `f64` nanoseconds.

mod outliers;
mod percentiles;
mod summary;

pub use outliers::{DEFAULT_IQR_MULTIPLIER, MIN_OUTLIER_SAMPLES, OutlierAnalysis, remove_outliers};
pub use percentiles::{SortedSamples, percentile};
pub use summary::{SummaryStatistics, calculate, mean, std_dev};
