//! Benchmark Execution
//!
//! Core execution logic: validates the algorithm and configuration, runs
//! warmup and timed iterations for every operation of the algorithm's kind,
//! and assembles the per-algorithm result set.
//!
//! ## Data Flow
//!
//! ```text
//! Algorithm (from a Provider)
//!        │
//!        ▼
//!   ExecutionConfig ──► validate
//!        │
//!        ▼
//! ┌──────────────────┐
//! │  per operation   │  Setup (untimed) → Warmup → Measurement
//! └────────┬─────────┘
//!          │
//!          ▼
//!  statistics (optional IQR filter, summary)
//!          │
//!          ▼
//!  ResultSet (all operations, or an error)
//! ```
//!
//! A failure in any operation discards the results of the operations that
//! already finished; callers get a complete result set or an error.

use super::statistics::compute_statistics;
use crate::config::{DEFAULT_SIGN_MESSAGE, PqcConfig};
use crate::planner::ExecutionPlan;
use indicatif::{ProgressBar, ProgressStyle};
use pqcbench_core::{
    Algorithm, BenchError, Bencher, KemAlgorithm, Operation, OperationError, Provider, Result,
    SignatureAlgorithm, architecture, run_benchmark_loop, zeroed_buffer,
};
use pqcbench_report::{OperationResult, OutputFormat, ResultSet};

/// Configuration for benchmark execution
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    /// Timed iterations per operation
    pub iterations: usize,
    /// Untimed warmup iterations per operation
    pub warmup_iterations: usize,
    /// Apply IQR outlier removal before summarizing
    pub remove_outliers: bool,
    /// IQR multiplier
    pub outlier_multiplier: f64,
    /// Preferred output format
    pub output_format: OutputFormat,
    /// Verbose logging
    pub verbose: bool,
    /// Message signed by signature benchmarks
    pub message: String,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            warmup_iterations: 100,
            remove_outliers: false,
            outlier_multiplier: 1.5,
            output_format: OutputFormat::Json,
            verbose: false,
            message: DEFAULT_SIGN_MESSAGE.to_string(),
        }
    }
}

impl ExecutionConfig {
    /// Build from file configuration (defaults where the file is silent)
    pub fn from_file(config: &PqcConfig) -> Self {
        Self {
            iterations: config.runner.iterations,
            warmup_iterations: config.runner.warmup,
            remove_outliers: config.runner.remove_outliers,
            outlier_multiplier: config.runner.outlier_multiplier,
            output_format: config.output.format,
            verbose: false,
            message: config.runner.message.clone(),
        }
    }

    /// Reject configurations that cannot produce a measurement
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(BenchError::InvalidParam(
                "iterations must be greater than zero".to_string(),
            ));
        }
        if self.remove_outliers
            && !(self.outlier_multiplier.is_finite() && self.outlier_multiplier > 0.0)
        {
            return Err(BenchError::InvalidParam(format!(
                "outlier multiplier must be positive, got {}",
                self.outlier_multiplier
            )));
        }
        Ok(())
    }
}

/// Outcome of benchmarking one planned algorithm
#[derive(Debug)]
pub struct AlgorithmRun {
    /// Algorithm name
    pub algorithm: String,
    /// Complete result set, or the error that aborted it
    pub outcome: Result<ResultSet>,
}

/// Execute benchmarks and produce results
pub struct Executor {
    config: ExecutionConfig,
}

impl Executor {
    /// Executor running every algorithm with `config`
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    /// Configuration shared by every run
    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Execute every algorithm in the plan, one at a time
    pub fn execute(&self, provider: &dyn Provider, plan: &ExecutionPlan) -> Vec<AlgorithmRun> {
        let pb = ProgressBar::new(plan.algorithms.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut runs = Vec::with_capacity(plan.algorithms.len());
        for planned in &plan.algorithms {
            pb.set_message(planned.name.clone());
            let outcome = provider.create(&planned.name).and_then(|alg| {
                let outcome = self.benchmark(&alg);
                provider.destroy(alg);
                outcome
            });
            runs.push(AlgorithmRun {
                algorithm: planned.name.clone(),
                outcome,
            });
            pb.inc(1);
        }

        pb.finish_with_message("Complete");
        runs
    }

    /// Benchmark every operation of `algorithm`.
    ///
    /// Returns a result set with one entry per operation in evaluation
    /// order, or the first error encountered.
    pub fn benchmark(&self, algorithm: &Algorithm) -> Result<ResultSet> {
        let _span = tracing::info_span!("benchmark", algorithm = algorithm.name()).entered();

        self.config
            .validate()
            .inspect_err(|e| tracing::error!(error = %e, "invalid configuration"))?;
        algorithm
            .validate()
            .inspect_err(|e| tracing::error!(error = %e, "invalid algorithm"))?;

        tracing::info!(
            kind = %algorithm.kind(),
            variant = algorithm.variant(),
            iterations = self.config.iterations,
            warmup = self.config.warmup_iterations,
            "starting benchmark"
        );

        let arch = architecture();
        let mut results = Vec::with_capacity(algorithm.operations().len());
        for &operation in algorithm.operations() {
            let result = self
                .run_operation(algorithm, operation, arch)
                .inspect_err(|e| tracing::error!(%operation, error = %e, "benchmark aborted"))?;
            results.push(result);
        }

        Ok(ResultSet::new(algorithm.name(), arch, results))
    }

    /// Benchmark a single operation of `algorithm` by name
    pub fn benchmark_operation(
        &self,
        algorithm: &Algorithm,
        operation: &str,
    ) -> Result<OperationResult> {
        let operation: Operation = operation.parse()?;
        let _span = tracing::info_span!(
            "benchmark",
            algorithm = algorithm.name(),
            operation = operation.as_str()
        )
        .entered();

        self.config.validate()?;
        algorithm.validate()?;
        if !operation.applies_to(algorithm.kind()) {
            return Err(BenchError::NotSupported {
                algorithm: algorithm.name().to_string(),
                operation,
            });
        }

        self.run_operation(algorithm, operation, architecture())
    }

    fn run_operation(
        &self,
        algorithm: &Algorithm,
        operation: Operation,
        arch: &str,
    ) -> Result<OperationResult> {
        let samples = match algorithm {
            Algorithm::Kem(kem) => self.measure_kem(kem, operation)?,
            Algorithm::Signature(sig) => self.measure_signature(sig, operation)?,
        };

        let stats = compute_statistics(samples, &self.config);
        tracing::info!(
            %operation,
            samples = stats.samples.len(),
            outliers_removed = stats.outliers_removed,
            mean_ns = stats.summary.mean,
            median_ns = stats.summary.median,
            "operation complete"
        );

        Ok(OperationResult {
            algorithm: algorithm.name().to_string(),
            operation,
            architecture: arch.to_string(),
            samples: stats.samples,
            statistics: stats.summary,
            outliers_removed: stats.outliers_removed,
        })
    }

    fn measure_kem(&self, kem: &KemAlgorithm, operation: Operation) -> Result<Vec<u64>> {
        let name = kem.info.name.as_str();
        let lengths = kem.lengths;
        let scheme = kem.scheme.as_ref();

        let mut pk = zeroed_buffer(lengths.public_key, "public key")?;
        let mut sk = zeroed_buffer(lengths.secret_key, "secret key")?;

        match operation {
            Operation::Keygen => self.measure(name, operation, || scheme.keygen(&mut pk, &mut sk)),
            Operation::Encaps => {
                let mut ct = zeroed_buffer(lengths.ciphertext, "ciphertext")?;
                let mut ss = zeroed_buffer(lengths.shared_secret, "shared secret")?;
                setup(name, operation, Operation::Keygen, scheme.keygen(&mut pk, &mut sk))?;
                self.measure(name, operation, || scheme.encaps(&mut ct, &mut ss, &pk))
            }
            Operation::Decaps => {
                let mut ct = zeroed_buffer(lengths.ciphertext, "ciphertext")?;
                let mut ss = zeroed_buffer(lengths.shared_secret, "shared secret")?;
                let mut ss_dec = zeroed_buffer(lengths.shared_secret, "shared secret")?;
                setup(name, operation, Operation::Keygen, scheme.keygen(&mut pk, &mut sk))?;
                setup(name, operation, Operation::Encaps, scheme.encaps(&mut ct, &mut ss, &pk))?;
                self.measure(name, operation, || scheme.decaps(&mut ss_dec, &ct, &sk))
            }
            Operation::Sign | Operation::Verify => Err(BenchError::NotSupported {
                algorithm: name.to_string(),
                operation,
            }),
        }
    }

    fn measure_signature(
        &self,
        sig: &SignatureAlgorithm,
        operation: Operation,
    ) -> Result<Vec<u64>> {
        let name = sig.info.name.as_str();
        let lengths = sig.lengths;
        let scheme = sig.scheme.as_ref();
        let msg = self.config.message.as_bytes();

        let mut pk = zeroed_buffer(lengths.public_key, "public key")?;
        let mut sk = zeroed_buffer(lengths.secret_key, "secret key")?;

        match operation {
            Operation::Keygen => self.measure(name, operation, || scheme.keygen(&mut pk, &mut sk)),
            Operation::Sign => {
                let mut signature = zeroed_buffer(lengths.signature, "signature")?;
                setup(name, operation, Operation::Keygen, scheme.keygen(&mut pk, &mut sk))?;
                self.measure(name, operation, || scheme.sign(&mut signature, msg, &sk))
            }
            Operation::Verify => {
                let mut signature = zeroed_buffer(lengths.signature, "signature")?;
                setup(name, operation, Operation::Keygen, scheme.keygen(&mut pk, &mut sk))?;
                let sig_len = setup(
                    name,
                    operation,
                    Operation::Sign,
                    scheme.sign(&mut signature, msg, &sk).and_then(|len| {
                        if len > signature.len() {
                            Err(OperationError::Malformed("signature length"))
                        } else {
                            Ok(len)
                        }
                    }),
                )?;
                let signature = &signature[..sig_len];
                self.measure(name, operation, || scheme.verify(msg, signature, &pk))
            }
            Operation::Encaps | Operation::Decaps => Err(BenchError::NotSupported {
                algorithm: name.to_string(),
                operation,
            }),
        }
    }

    /// Warmup and timed loop for one operation
    fn measure<T, F>(&self, algorithm: &str, operation: Operation, routine: F) -> Result<Vec<u64>>
    where
        F: FnMut() -> std::result::Result<T, OperationError>,
    {
        let bencher = Bencher::new(self.config.iterations)?;
        tracing::debug!(
            %operation,
            warmup = self.config.warmup_iterations,
            iterations = self.config.iterations,
            "measuring"
        );

        run_benchmark_loop(bencher, routine, self.config.warmup_iterations)
            .map(|result| result.samples)
            .map_err(|failure| {
                tracing::error!(
                    algorithm,
                    %operation,
                    iteration = failure.iteration,
                    error = %failure.error,
                    "operation failed"
                );
                BenchError::OperationFailed {
                    algorithm: algorithm.to_string(),
                    operation,
                    iteration: failure.iteration,
                    source: failure.error,
                }
            })
    }
}

/// Map a failed prerequisite into [`BenchError::SetupFailed`]
fn setup<T>(
    algorithm: &str,
    operation: Operation,
    step: Operation,
    outcome: std::result::Result<T, OperationError>,
) -> Result<T> {
    outcome.map_err(|source| {
        tracing::error!(algorithm, %operation, %step, error = %source, "setup failed");
        BenchError::SetupFailed {
            algorithm: algorithm.to_string(),
            operation,
            step,
            source,
        }
    })
}

/// Benchmark every operation of `algorithm` with `config`
pub fn benchmark(algorithm: &Algorithm, config: &ExecutionConfig) -> Result<ResultSet> {
    Executor::new(config.clone()).benchmark(algorithm)
}

/// Benchmark one operation of `algorithm`, named `"keygen"`, `"encaps"`,
/// `"decaps"`, `"sign"` or `"verify"`
pub fn benchmark_operation(
    algorithm: &Algorithm,
    operation: &str,
    config: &ExecutionConfig,
) -> Result<OperationResult> {
    Executor::new(config.clone()).benchmark_operation(algorithm, operation)
}
