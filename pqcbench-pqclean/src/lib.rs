//! PQClean provider for pqcbench
//!
//! Exposes the ML-KEM (FIPS 203) and ML-DSA (FIPS 204) schemes from the
//! `pqcrypto` bindings as benchmarkable [`Algorithm`]s.
//!
//! ```ignore
//! let mut registry = ProviderRegistry::new();
//! registry.register(Box::new(PqcleanProvider))?;
//! let mlkem = registry.create(Some("pqclean"), "mlkem768")?;
//! ```

mod kem;
mod sign;

pub use kem::{MlKem512, MlKem768, MlKem1024};
pub use sign::{MlDsa44, MlDsa65, MlDsa87};

use pqcbench_core::{Algorithm, BenchError, OpResult, OperationError, Provider, Result};

/// Name the provider registers under
pub const PROVIDER_NAME: &str = "pqclean";

/// Versions of the bound `pqcrypto` crates
pub const PROVIDER_VERSION: &str = "mlkem-0.1/mldsa-0.1";

/// Every algorithm the provider can create, KEMs first
pub const ALGORITHMS: &[&str] = &[
    MlKem512::NAME,
    MlKem768::NAME,
    MlKem1024::NAME,
    MlDsa44::NAME,
    MlDsa65::NAME,
    MlDsa87::NAME,
];

/// Provider over the PQClean reference implementations
#[derive(Debug, Default, Clone, Copy)]
pub struct PqcleanProvider;

impl Provider for PqcleanProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn version(&self) -> &str {
        PROVIDER_VERSION
    }

    fn list_algorithms(&self) -> Vec<String> {
        ALGORITHMS.iter().map(|s| s.to_string()).collect()
    }

    fn create(&self, name: &str) -> Result<Algorithm> {
        let algorithm = match name {
            MlKem512::NAME => MlKem512::algorithm(),
            MlKem768::NAME => MlKem768::algorithm(),
            MlKem1024::NAME => MlKem1024::algorithm(),
            MlDsa44::NAME => MlDsa44::algorithm(),
            MlDsa65::NAME => MlDsa65::algorithm(),
            MlDsa87::NAME => MlDsa87::algorithm(),
            other => return Err(BenchError::AlgorithmNotFound(other.to_string())),
        };
        tracing::trace!(algorithm = name, "created pqclean algorithm");
        Ok(algorithm)
    }
}

/// Copy a backend artifact into a caller buffer sized from the declared lengths
pub(crate) fn copy_artifact(dst: &mut [u8], src: &[u8], what: &'static str) -> OpResult {
    let dst = dst
        .get_mut(..src.len())
        .ok_or(OperationError::Malformed(what))?;
    dst.copy_from_slice(src);
    Ok(())
}
