//! Human-readable Output
//!
//! Terminal-friendly rendering of a result set and of the artifact-size
//! table.

use crate::report::ResultSet;
use pqcbench_core::ArtifactSizes;

/// Format a result set for terminal display
pub fn format_human_output(set: &ResultSet) -> String {
    let mut output = String::new();

    output.push('\n');
    output.push_str(&format!("Benchmark Results: {}\n", set.algorithm));
    output.push_str(&"=".repeat(60));
    output.push('\n');
    output.push_str(&format!("Architecture: {}\n", set.architecture));
    output.push_str(&format!(
        "Timestamp:    {}\n\n",
        set.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    for result in &set.results {
        let m = result.metrics();
        output.push_str(&format!("Operation: {}\n", result.operation));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!("  samples:  {}", result.num_samples()));
        if result.outliers_removed > 0 {
            output.push_str(&format!(" ({} outliers removed)", result.outliers_removed));
        }
        output.push('\n');
        output.push_str(&format!(
            "  mean:     {:>12.2} us    median: {:>12.2} us\n",
            m.mean_us, m.median_us
        ));
        output.push_str(&format!("  std dev:  {:>12.2} us\n", m.stddev_us));
        output.push_str(&format!(
            "  min:      {:>12.2} us    max:    {:>12.2} us\n",
            m.min_us, m.max_us
        ));
        output.push_str(&format!(
            "  p95:      {:>12.2} us    p99:    {:>12.2} us\n\n",
            m.p95_us, m.p99_us
        ));
    }

    output
}

/// Format artifact sizes as an aligned table, in bytes
pub fn format_sizes_table(sizes: &[ArtifactSizes]) -> String {
    let name_width = sizes
        .iter()
        .map(|s| s.algorithm.len())
        .max()
        .unwrap_or(9)
        .max("Algorithm".len());

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:<9}  {:>10}  {:>10}  {:>10}  {:>13}  {:>9}\n",
        "Algorithm",
        "Kind",
        "PublicKey",
        "SecretKey",
        "Ciphertext",
        "SharedSecret",
        "Signature",
        width = name_width
    ));
    output.push_str(&"-".repeat(name_width + 75));
    output.push('\n');

    for s in sizes {
        // Zero means the artifact does not exist for this kind
        let cell = |v: usize| {
            if v == 0 {
                "-".to_string()
            } else {
                v.to_string()
            }
        };
        output.push_str(&format!(
            "{:<width$}  {:<9}  {:>10}  {:>10}  {:>10}  {:>13}  {:>9}\n",
            s.algorithm,
            s.kind.to_string(),
            s.public_key,
            s.secret_key,
            cell(s.ciphertext),
            cell(s.shared_secret),
            cell(s.signature),
            width = name_width
        ));
    }

    output
}
