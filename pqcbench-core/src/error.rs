//! Error Taxonomy
//!
//! `BenchError` is returned by every fallible engine, contract and registry
//! call. `OperationError` is what a single primitive call reports; the engine
//! wraps it with the algorithm, operation and iteration that produced it.

use crate::algorithm::Operation;
use thiserror::Error;

/// Failure of a single cryptographic primitive call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    /// Backend returned a non-zero status code
    #[error("primitive returned status {0}")]
    Status(i32),

    /// An input or output artifact had the wrong shape
    #[error("malformed {0}")]
    Malformed(&'static str),

    /// Signature verification rejected the signature
    #[error("signature verification failed")]
    VerificationFailed,

    /// Backend-specific failure
    #[error("{0}")]
    Backend(String),
}

/// Errors produced by the benchmark engine and its contracts
#[derive(Debug, Error)]
pub enum BenchError {
    /// A required input was missing or empty
    #[error("missing required input: {0}")]
    NullInput(&'static str),

    /// A parameter or configuration value was out of range
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// No provider offers the requested algorithm
    #[error("algorithm not found: {0}")]
    AlgorithmNotFound(String),

    /// No provider is registered under the requested name
    #[error("provider not found: {0}")]
    ProviderNotFound(String),

    /// A prerequisite step failed before the measured operation could run
    #[error("{algorithm} {operation}: setup step {step} failed: {source}")]
    SetupFailed {
        /// Algorithm being benchmarked
        algorithm: String,
        /// Operation whose setup failed
        operation: Operation,
        /// Prerequisite that failed
        step: Operation,
        /// Underlying primitive failure
        #[source]
        source: OperationError,
    },

    /// The measured operation failed during warmup or measurement
    #[error("{algorithm} {operation} failed at iteration {iteration}: {source}")]
    OperationFailed {
        /// Algorithm being benchmarked
        algorithm: String,
        /// Operation under measurement
        operation: Operation,
        /// Zero-based index of the failing timed iteration
        iteration: usize,
        /// Underlying primitive failure
        #[source]
        source: OperationError,
    },

    /// A sample or artifact buffer could not be allocated
    #[error("failed to allocate {bytes} bytes for {what}")]
    AllocationFailed {
        /// Buffer being allocated
        what: &'static str,
        /// Requested size in bytes
        bytes: usize,
    },

    /// The operation does not exist for this algorithm kind
    #[error("{algorithm} does not support {operation}")]
    NotSupported {
        /// Algorithm name
        algorithm: String,
        /// Requested operation
        operation: Operation,
    },

    /// The engine or a provider was used in an invalid state
    #[error("invalid state: {0}")]
    InvalidState(String),
}

impl BenchError {
    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            BenchError::NullInput(_) => "null_input",
            BenchError::InvalidParam(_) => "invalid_param",
            BenchError::AlgorithmNotFound(_) => "algorithm_not_found",
            BenchError::ProviderNotFound(_) => "provider_not_found",
            BenchError::SetupFailed { .. } => "setup_failed",
            BenchError::OperationFailed { .. } => "operation_failed",
            BenchError::AllocationFailed { .. } => "allocation_failed",
            BenchError::NotSupported { .. } => "not_supported",
            BenchError::InvalidState(_) => "invalid_state",
        }
    }
}

/// Result alias used across pqcbench crates
pub type Result<T, E = BenchError> = std::result::Result<T, E>;

/// Allocate a zeroed byte buffer, reporting allocation failure instead of aborting
pub fn zeroed_buffer(len: usize, what: &'static str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| BenchError::AllocationFailed { what, bytes: len })?;
    buf.resize(len, 0);
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_failed_message_has_context() {
        let err = BenchError::OperationFailed {
            algorithm: "mlkem512".to_string(),
            operation: Operation::Decaps,
            iteration: 17,
            source: OperationError::Status(-5),
        };
        let msg = err.to_string();
        assert!(msg.contains("mlkem512"));
        assert!(msg.contains("decaps"));
        assert!(msg.contains("17"));
        assert_eq!(err.kind(), "operation_failed");
    }

    #[test]
    fn test_setup_failed_names_the_step() {
        let err = BenchError::SetupFailed {
            algorithm: "mldsa44".to_string(),
            operation: Operation::Verify,
            step: Operation::Sign,
            source: OperationError::Backend("boom".to_string()),
        };
        assert!(err.to_string().contains("setup step sign"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_zeroed_buffer() {
        let buf = zeroed_buffer(32, "shared secret").unwrap();
        assert_eq!(buf.len(), 32);
        assert!(buf.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_zeroed_buffer_reports_allocation_failure() {
        let err = zeroed_buffer(usize::MAX, "ciphertext").unwrap_err();
        assert!(matches!(
            err,
            BenchError::AllocationFailed {
                what: "ciphertext",
                ..
            }
        ));
    }
}
