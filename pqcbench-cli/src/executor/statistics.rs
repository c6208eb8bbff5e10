//! Statistics Computation
//!
//! Filtering and summary stage between measurement and reporting. Runs on the
//! calling thread; nothing here is timed.

use super::execution::ExecutionConfig;
use pqcbench_stats::{SummaryStatistics, calculate, remove_outliers};

/// Samples and summary for one operation
#[derive(Debug, Clone)]
pub struct OperationStatistics {
    /// Samples kept after optional outlier removal
    pub samples: Vec<u64>,
    /// Summary of the kept samples, in nanoseconds
    pub summary: SummaryStatistics,
    /// Samples dropped by outlier removal
    pub outliers_removed: usize,
}

/// Apply the configured outlier filter, then summarize what remains
pub fn compute_statistics(samples: Vec<u64>, config: &ExecutionConfig) -> OperationStatistics {
    let (samples, outliers_removed) = if config.remove_outliers {
        let analysis = remove_outliers(&samples, config.outlier_multiplier);
        let removed = analysis.removed();
        if removed > 0 {
            tracing::info!(
                removed,
                retained = analysis.retained_count(),
                lower_bound = analysis.lower_bound,
                upper_bound = analysis.upper_bound,
                "outliers removed"
            );
        }
        (analysis.retained, removed)
    } else {
        (samples, 0)
    };

    let summary = calculate(&samples);
    OperationStatistics {
        samples,
        summary,
        outliers_removed,
    }
}
