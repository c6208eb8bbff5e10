#![warn(missing_docs)]
//! # PQCBench
//!
//! Latency benchmarking for post-quantum key-encapsulation and signature
//! primitives.
//!
//! PQCBench measures each operation of an algorithm (keygen, encaps, decaps
//! for KEMs; keygen, sign, verify for signatures) one call at a time with a
//! monotonic nanosecond clock:
//! - **Providers**: backends register algorithms by name in a [`ProviderRegistry`]
//! - **Fixed protocol**: setup once, untimed warmup, then N timed calls per operation
//! - **Statistics**: mean, median, standard deviation, P95/P99, optional IQR outlier removal
//! - **Reports**: JSON and CSV files per algorithm, or a human-readable table
//!
//! ## Quick Start
//!
//! ```ignore
//! use pqcbench::prelude::*;
//!
//! let registry = pqcbench::default_registry()?;
//! let mlkem = registry.create(Some("pqclean"), "mlkem768")?;
//! let config = ExecutionConfig { iterations: 100, ..Default::default() };
//! let results = benchmark(&mlkem, &config)?;
//! println!("{}", format_human_output(&results));
//! ```
//!
//! ## Custom Providers
//!
//! ```ignore
//! struct MyKem;
//!
//! impl KemScheme for MyKem {
//!     fn keygen(&self, pk: &mut [u8], sk: &mut [u8]) -> OpResult { /* ... */ }
//!     fn encaps(&self, ct: &mut [u8], ss: &mut [u8], pk: &[u8]) -> OpResult { /* ... */ }
//!     fn decaps(&self, ss: &mut [u8], ct: &[u8], sk: &[u8]) -> OpResult { /* ... */ }
//! }
//! ```

// Re-export core types
pub use pqcbench_core::{
    Algorithm, AlgorithmDescriptor, AlgorithmInfo, AlgorithmKind, ArtifactSizes, BenchError,
    Bencher, BenchmarkResult, KemAlgorithm, KemLengths, KemScheme, OpResult, Operation,
    OperationError, Provider, ProviderRegistry, SignatureAlgorithm, SignatureLengths,
    SignatureScheme, Timer, Timestamp, architecture, resolution, validate,
};

// Re-export stats
pub use pqcbench_stats::{
    OutlierAnalysis, SortedSamples, SummaryStatistics, calculate, mean, percentile,
    remove_outliers, std_dev,
};

// Re-export reports
pub use pqcbench_report::{
    OperationMetrics, OperationResult, OutputFormat, ResultSet, format_human_output,
    format_sizes_table, generate_csv_report, generate_json_report, generate_sizes_json,
};

// Re-export the engine
pub use pqcbench_cli::{AlgorithmRun, ExecutionConfig, Executor, benchmark, benchmark_operation};

pub use pqcbench_pqclean::PqcleanProvider;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Algorithm, AlgorithmKind, ExecutionConfig, KemLengths, KemScheme, OpResult, Operation,
        OperationError, Provider, ProviderRegistry, ResultSet, SignatureLengths,
        SignatureScheme, benchmark, benchmark_operation, format_human_output,
    };
}

/// Registry with every built-in provider registered
pub fn default_registry() -> pqcbench_core::Result<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();
    registry.register(Box::new(PqcleanProvider))?;
    Ok(registry)
}

/// Run the PQCBench CLI harness with the built-in providers.
///
/// ```ignore
/// fn main() {
///     pqcbench::run().unwrap();
/// }
/// ```
pub fn run() -> anyhow::Result<()> {
    pqcbench_cli::run(default_registry()?)
}
