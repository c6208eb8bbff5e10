#![warn(missing_docs)]
//! PQCBench Core - Contracts and Measurement
//!
//! This crate provides what the benchmark engine builds on:
//! - Monotonic timing source (`clock_gettime` with an `Instant` fallback)
//! - Algorithm capability contract (KEM / signature) and its validation
//! - Provider contract and an explicit provider registry
//! - `Bencher` for count-based warmup and timed iterations
//! - The error taxonomy shared by every pqcbench crate

mod algorithm;
mod bencher;
mod error;
mod measure;
mod provider;

pub use algorithm::{
    Algorithm, AlgorithmDescriptor, AlgorithmInfo, AlgorithmKind, ArtifactSizes, DecapsFn,
    EncapsFn, KemAlgorithm, KemLengths, KemScheme, KeygenFn, OpResult, Operation,
    SignFn, SignatureAlgorithm, SignatureLengths, SignatureScheme, VerifyFn, validate,
};
pub use bencher::{Bencher, BenchmarkResult, IterationFailure, run_benchmark_loop};
pub use error::{BenchError, OperationError, Result, zeroed_buffer};
pub use measure::{
    NANOS_PER_MICRO, NANOS_PER_MILLI, NANOS_PER_SEC, Timer, Timestamp, ns_to_ms, ns_to_s, ns_to_us,
    resolution,
};
pub use provider::{Provider, ProviderRegistry};

/// Architecture tag recorded with every result.
///
/// `native` is the x86_64 development host; the other tags name the
/// cross-compiled targets.
pub fn architecture() -> &'static str {
    if cfg!(target_arch = "aarch64") {
        "arm64"
    } else if cfg!(target_arch = "riscv64") {
        "riscv64"
    } else if cfg!(target_arch = "x86_64") {
        "native"
    } else {
        "unknown"
    }
}
