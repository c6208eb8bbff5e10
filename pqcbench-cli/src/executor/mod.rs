//! Benchmark Executor
//!
//! Runs algorithms through the measurement protocol and collects results.
//! Everything runs sequentially on the calling thread so that one
//! measurement never overlaps another.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Algorithm (created by a Provider)
//!       │
//!       ▼
//! ┌─────────────┐
//! │  execution  │  Validate, set up, warm up, time each operation
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ statistics  │  Optional IQR filter, summary stats
//! └──────┬──────┘
//!        │
//!        ▼
//! ┌─────────────┐
//! │ formatting  │  Run summary
//! └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`execution`] - Engine state machine and the per-operation protocols
//! - [`statistics`] - Outlier filtering and summary computation
//! - [`formatting`] - Human-readable run summary

mod execution;
mod formatting;
mod statistics;

// Re-export public API
pub use execution::{AlgorithmRun, ExecutionConfig, Executor, benchmark, benchmark_operation};
pub use formatting::{count_failures, format_run_summary};
pub use statistics::{OperationStatistics, compute_statistics};
