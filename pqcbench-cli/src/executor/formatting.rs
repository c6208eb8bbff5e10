//! Output Formatting
//!
//! Terminal summary of a run: one line per algorithm with a status icon,
//! followed by the failure count.

use super::execution::AlgorithmRun;

/// Number of algorithms whose benchmark failed
pub fn count_failures(runs: &[AlgorithmRun]) -> usize {
    runs.iter().filter(|r| r.outcome.is_err()).count()
}

/// Format the outcome of a run for terminal display
pub fn format_run_summary(runs: &[AlgorithmRun]) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str("PQCBench Summary\n");
    output.push_str(&"=".repeat(60));
    output.push('\n');

    for run in runs {
        match &run.outcome {
            Ok(set) => {
                let ops: Vec<&str> = set.results.iter().map(|r| r.operation.as_str()).collect();
                output.push_str(&format!("  ✓ {} ({})\n", run.algorithm, ops.join(", ")));
            }
            Err(e) => {
                output.push_str(&format!("  ✗ {}\n", run.algorithm));
                output.push_str(&format!("      error: {}\n", e));
            }
        }
    }

    let failures = count_failures(runs);
    output.push_str(&"-".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "{} benchmarked, {} failed\n",
        runs.len() - failures,
        failures
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqcbench_core::BenchError;
    use pqcbench_report::ResultSet;

    #[test]
    fn test_summary_counts_failures() {
        let runs = vec![
            AlgorithmRun {
                algorithm: "mlkem512".to_string(),
                outcome: Ok(ResultSet::new("mlkem512", "native", Vec::new())),
            },
            AlgorithmRun {
                algorithm: "broken".to_string(),
                outcome: Err(BenchError::AlgorithmNotFound("broken".to_string())),
            },
        ];

        assert_eq!(count_failures(&runs), 1);
        let text = format_run_summary(&runs);
        assert!(text.contains("✓ mlkem512"));
        assert!(text.contains("✗ broken"));
        assert!(text.contains("algorithm not found: broken"));
        assert!(text.contains("1 benchmarked, 1 failed"));
    }
}
