//! Result Model
//!
//! Statistics are kept in nanoseconds; conversion to microseconds happens
//! only when metrics are read for reporting.

use chrono::{DateTime, Utc};
use pqcbench_core::{Operation, ns_to_us};
use pqcbench_stats::SummaryStatistics;
use serde::{Deserialize, Serialize};

/// Reporting view of one operation's statistics, in microseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationMetrics {
    /// Arithmetic mean
    pub mean_us: f64,
    /// Median (P50)
    pub median_us: f64,
    /// Standard deviation
    pub stddev_us: f64,
    /// Fastest sample
    pub min_us: f64,
    /// Slowest sample
    pub max_us: f64,
    /// 95th percentile
    pub p95_us: f64,
    /// 99th percentile
    pub p99_us: f64,
}

impl From<&SummaryStatistics> for OperationMetrics {
    fn from(stats: &SummaryStatistics) -> Self {
        Self {
            mean_us: ns_to_us(stats.mean),
            median_us: ns_to_us(stats.median),
            stddev_us: ns_to_us(stats.std_dev),
            min_us: ns_to_us(stats.min),
            max_us: ns_to_us(stats.max),
            p95_us: ns_to_us(stats.p95),
            p99_us: ns_to_us(stats.p99),
        }
    }
}

/// Result of benchmarking one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Algorithm name
    pub algorithm: String,
    /// Operation that was timed
    pub operation: Operation,
    /// Architecture tag of the host
    pub architecture: String,
    /// Samples the statistics were computed from (after outlier removal)
    pub samples: Vec<u64>,
    /// Statistics in nanoseconds
    pub statistics: SummaryStatistics,
    /// Samples dropped by outlier removal
    pub outliers_removed: usize,
}

impl OperationResult {
    /// Number of samples the statistics describe
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Statistics converted to microseconds
    pub fn metrics(&self) -> OperationMetrics {
        OperationMetrics::from(&self.statistics)
    }
}

/// All operation results for one algorithm, in evaluation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Algorithm name
    pub algorithm: String,
    /// Architecture tag of the host
    pub architecture: String,
    /// When the set was assembled
    pub timestamp: DateTime<Utc>,
    /// One entry per benchmarked operation
    pub results: Vec<OperationResult>,
}

impl ResultSet {
    /// Assemble a result set stamped with the current time
    pub fn new(
        algorithm: impl Into<String>,
        architecture: impl Into<String>,
        results: Vec<OperationResult>,
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            architecture: architecture.into(),
            timestamp: Utc::now(),
            results,
        }
    }

    /// Result for `operation`, if it was benchmarked
    pub fn get(&self, operation: Operation) -> Option<&OperationResult> {
        self.results.iter().find(|r| r.operation == operation)
    }

    /// Number of operation results
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no operation was benchmarked
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn operation(operation: Operation, samples: Vec<u64>) -> OperationResult {
        let statistics = pqcbench_stats::calculate(&samples);
        OperationResult {
            algorithm: "mlkem512".to_string(),
            operation,
            architecture: "native".to_string(),
            samples,
            statistics,
            outliers_removed: 0,
        }
    }

    pub fn kem_result_set() -> ResultSet {
        ResultSet::new(
            "mlkem512",
            "native",
            vec![
                operation(Operation::Keygen, vec![1_000, 2_000, 3_000]),
                operation(Operation::Encaps, vec![1_500, 1_500]),
                operation(Operation::Decaps, vec![2_250]),
            ],
        )
    }
}
