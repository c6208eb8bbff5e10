//! Benchmark Planner
//!
//! Builds execution plan by filtering and ordering a provider's algorithms.
//!
//! Filtering options:
//! - Regex pattern matching on algorithm name
//! - Algorithm kind (KEM or signature)
//!
//! Ordering: Algorithms are sorted alphabetically by name for deterministic execution.

use pqcbench_core::{AlgorithmKind, ArtifactSizes, Provider};

/// One algorithm selected for execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedAlgorithm {
    /// Algorithm name as known to the provider
    pub name: String,
    /// KEM or signature
    pub kind: AlgorithmKind,
    /// Declared artifact sizes
    pub sizes: ArtifactSizes,
}

/// Execution plan for one provider
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    /// Provider the algorithms come from
    pub provider: String,
    /// Ordered list of algorithms to run
    pub algorithms: Vec<PlannedAlgorithm>,
}

impl ExecutionPlan {
    /// Whether nothing was selected
    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

/// Build execution plan from a provider's algorithm list
///
/// Each candidate is instantiated once to learn its kind and sizes, then
/// released. Names the provider lists but cannot create are skipped.
pub fn build_plan(
    provider: &dyn Provider,
    filter: Option<&regex::Regex>,
    kind: Option<AlgorithmKind>,
) -> ExecutionPlan {
    let mut selected: Vec<PlannedAlgorithm> = provider
        .list_algorithms()
        .into_iter()
        .filter(|name| {
            // Apply regex filter on algorithm name
            filter.is_none_or(|re| re.is_match(name))
        })
        .filter_map(|name| match provider.create(&name) {
            Ok(alg) => {
                let planned = PlannedAlgorithm {
                    kind: alg.kind(),
                    sizes: alg.sizes(),
                    name,
                };
                provider.destroy(alg);
                Some(planned)
            }
            Err(e) => {
                tracing::warn!(provider = provider.name(), algorithm = %name, error = %e, "skipping algorithm");
                None
            }
        })
        .filter(|p| kind.is_none_or(|k| p.kind == k))
        .collect();

    // Sort alphabetically for deterministic execution order
    selected.sort_by(|a, b| a.name.cmp(&b.name));

    ExecutionPlan {
        provider: provider.name().to_string(),
        algorithms: selected,
    }
}
