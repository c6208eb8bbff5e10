//! CSV Output

use crate::report::ResultSet;
use std::borrow::Cow;
use std::fmt::Write as _;

/// Header row of every CSV report
pub const CSV_HEADER: &str =
    "algorithm,architecture,operation,num_samples,mean_us,median_us,stddev_us,min_us,max_us,p95_us,p99_us";

/// Quote a field when it contains a separator, quote or line break
fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Generate a CSV report for one algorithm, one row per operation
pub fn generate_csv_report(set: &ResultSet) -> String {
    let mut output = String::with_capacity(CSV_HEADER.len() + 1 + set.results.len() * 96);
    output.push_str(CSV_HEADER);
    output.push('\n');

    let algorithm = escape(&set.algorithm);
    let architecture = escape(&set.architecture);

    for result in &set.results {
        let m = result.metrics();
        // Writing to a String cannot fail
        let _ = writeln!(
            output,
            "{},{},{},{},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2},{:.2}",
            algorithm,
            architecture,
            result.operation,
            result.num_samples(),
            m.mean_us,
            m.median_us,
            m.stddev_us,
            m.min_us,
            m.max_us,
            m.p95_us,
            m.p99_us,
        );
    }

    output
}
