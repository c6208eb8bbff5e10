//! Bencher - The Measurement Loop
//!
//! Count-based sampling: a fixed number of untimed warmup calls followed by a
//! fixed number of timed calls, one sample per call. Setup work (key
//! generation, encapsulation for decaps, signing for verify) is the caller's
//! job and happens before the loop, outside every timed region.

use crate::error::{BenchError, OperationError, Result};
use crate::measure::Timer;

/// Samples collected for one operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkResult {
    /// One nanosecond duration per timed call, in call order
    pub samples: Vec<u64>,
    /// Sum of all samples
    pub total_time_ns: u64,
}

/// Failure of a timed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationFailure {
    /// Zero-based index of the failing timed call
    pub iteration: usize,
    /// What the primitive reported
    pub error: OperationError,
}

/// Iteration control for one operation.
///
/// Starts in warmup mode: calls run untimed and their failures are ignored.
/// After [`Bencher::start_measurement`] every call is timed and the first
/// failure ends the loop.
pub struct Bencher {
    samples: Vec<u64>,
    target_samples: usize,
    warmup_calls: usize,
    is_warmup: bool,
}

impl Bencher {
    /// Create a Bencher that will collect `target_samples` timed samples.
    ///
    /// The sample buffer is reserved up front so the measurement phase never
    /// allocates.
    pub fn new(target_samples: usize) -> Result<Self> {
        let mut samples = Vec::new();
        samples
            .try_reserve_exact(target_samples)
            .map_err(|_| BenchError::AllocationFailed {
                what: "sample buffer",
                bytes: target_samples.saturating_mul(std::mem::size_of::<u64>()),
            })?;
        Ok(Self {
            samples,
            target_samples,
            warmup_calls: 0,
            is_warmup: true,
        })
    }

    /// Transition from warmup to measurement phase
    pub fn start_measurement(&mut self) {
        self.is_warmup = false;
        self.samples.clear();
    }

    /// Whether calls are still untimed warmup calls
    pub fn is_warmup(&self) -> bool {
        self.is_warmup
    }

    /// Run the routine for one iteration.
    ///
    /// During warmup the call is untimed and a failure is only logged.
    /// During measurement the call is timed and a failure is returned.
    #[inline]
    pub fn iter<T, F>(&mut self, mut f: F) -> std::result::Result<(), OperationError>
    where
        F: FnMut() -> std::result::Result<T, OperationError>,
    {
        if self.is_warmup {
            self.warmup_calls += 1;
            if let Err(err) = std::hint::black_box(f()) {
                tracing::trace!(call = self.warmup_calls, error = %err, "warmup call failed");
            }
            return Ok(());
        }

        let timer = Timer::start();
        let outcome = std::hint::black_box(f());
        let nanos = timer.stop();

        outcome?;
        self.samples.push(nanos);
        Ok(())
    }

    /// Whether the target sample count has been reached
    pub fn has_enough_samples(&self) -> bool {
        self.samples.len() >= self.target_samples
    }

    /// Get collected samples
    pub fn samples(&self) -> &[u64] {
        &self.samples
    }

    /// Timed calls completed so far
    pub fn iteration_count(&self) -> usize {
        self.samples.len()
    }

    /// Untimed warmup calls made so far
    pub fn warmup_count(&self) -> usize {
        self.warmup_calls
    }

    /// Timed samples requested at construction
    pub fn target_samples(&self) -> usize {
        self.target_samples
    }

    /// Finalize and return results
    pub fn finish(self) -> BenchmarkResult {
        let total_time_ns = self.samples.iter().fold(0u64, |acc, &s| acc.saturating_add(s));
        BenchmarkResult {
            samples: self.samples,
            total_time_ns,
        }
    }
}

/// Run the full loop: `warmup` untimed calls, then timed calls until the
/// target sample count is reached.
///
/// The first failing timed call discards every collected sample and reports
/// its iteration index.
pub fn run_benchmark_loop<T, F>(
    mut bencher: Bencher,
    mut routine: F,
    warmup: usize,
) -> std::result::Result<BenchmarkResult, IterationFailure>
where
    F: FnMut() -> std::result::Result<T, OperationError>,
{
    if warmup > 0 {
        tracing::debug!(iterations = warmup, "warmup");
    }
    for _ in 0..warmup {
        // Warmup never fails
        let _ = bencher.iter(&mut routine);
    }

    bencher.start_measurement();
    tracing::debug!(iterations = bencher.target_samples(), "measuring");

    while !bencher.has_enough_samples() {
        let iteration = bencher.iteration_count();
        bencher
            .iter(&mut routine)
            .map_err(|error| IterationFailure { iteration, error })?;
    }

    Ok(bencher.finish())
}
