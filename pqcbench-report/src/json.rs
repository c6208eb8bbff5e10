//! JSON Output
//!
//! Wire shape per algorithm:
//! `{ algorithm, architecture, results: [ { operation, num_samples, mean_us, ... } ] }`.
//! Latency fields are written with exactly two decimals.

use crate::report::ResultSet;
use pqcbench_core::ArtifactSizes;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

/// Serialize an `f64` as a JSON number with two fixed decimals
fn fixed2<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if !value.is_finite() {
        return serializer.serialize_none();
    }
    let raw = RawValue::from_string(format!("{value:.2}")).map_err(S::Error::custom)?;
    raw.serialize(serializer)
}

#[derive(Serialize)]
struct JsonResultSet<'a> {
    algorithm: &'a str,
    architecture: &'a str,
    results: Vec<JsonOperation<'a>>,
}

#[derive(Serialize)]
struct JsonOperation<'a> {
    operation: &'a str,
    num_samples: usize,
    #[serde(serialize_with = "fixed2")]
    mean_us: f64,
    #[serde(serialize_with = "fixed2")]
    median_us: f64,
    #[serde(serialize_with = "fixed2")]
    stddev_us: f64,
    #[serde(serialize_with = "fixed2")]
    min_us: f64,
    #[serde(serialize_with = "fixed2")]
    max_us: f64,
    #[serde(serialize_with = "fixed2")]
    p95_us: f64,
    #[serde(serialize_with = "fixed2")]
    p99_us: f64,
}

/// Generate a prettified JSON report for one algorithm.
pub fn generate_json_report(set: &ResultSet) -> Result<String, serde_json::Error> {
    let wire = JsonResultSet {
        algorithm: &set.algorithm,
        architecture: &set.architecture,
        results: set
            .results
            .iter()
            .map(|r| {
                let m = r.metrics();
                JsonOperation {
                    operation: r.operation.as_str(),
                    num_samples: r.num_samples(),
                    mean_us: m.mean_us,
                    median_us: m.median_us,
                    stddev_us: m.stddev_us,
                    min_us: m.min_us,
                    max_us: m.max_us,
                    p95_us: m.p95_us,
                    p99_us: m.p99_us,
                }
            })
            .collect(),
    };
    serde_json::to_string_pretty(&wire)
}

#[derive(Serialize)]
struct SizesReport<'a> {
    architecture: &'a str,
    algorithms: &'a [ArtifactSizes],
}

/// Generate a prettified JSON table of artifact sizes in bytes
pub fn generate_sizes_json(
    architecture: &str,
    sizes: &[ArtifactSizes],
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&SizesReport {
        architecture,
        algorithms: sizes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::kem_result_set;
    use pqcbench_core::AlgorithmKind;

    #[test]
    fn test_json_shape() {
        let json = generate_json_report(&kem_result_set()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["algorithm"], "mlkem512");
        assert_eq!(value["architecture"], "native");
        let results = value["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);

        let ops: Vec<&str> = results
            .iter()
            .map(|r| r["operation"].as_str().unwrap())
            .collect();
        assert_eq!(ops, vec!["keygen", "encaps", "decaps"]);
        assert_eq!(results[0]["num_samples"], 3);
        assert!((results[0]["mean_us"].as_f64().unwrap() - 2.0).abs() < 1e-9);

        let keys: Vec<&String> = results[0].as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 9);
    }

    #[test]
    fn test_two_decimal_formatting() {
        let json = generate_json_report(&kem_result_set()).unwrap();
        assert!(json.contains("\"mean_us\": 2.00"));
        assert!(json.contains("\"mean_us\": 1.50"));
        assert!(json.contains("\"p99_us\": 2.25"));
        assert!(json.contains("\"stddev_us\": 0.00"));
    }

    #[test]
    fn test_sizes_json() {
        let sizes = vec![ArtifactSizes {
            algorithm: "mlkem512".to_string(),
            variant: "512".to_string(),
            kind: AlgorithmKind::Kem,
            public_key: 800,
            secret_key: 1632,
            ciphertext: 768,
            shared_secret: 32,
            signature: 0,
        }];
        let json = generate_sizes_json("native", &sizes).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["algorithms"][0]["ciphertext"], 768);
        assert_eq!(value["algorithms"][0]["kind"], "kem");
    }
}
