//! Configuration loading from pqcbench.toml
//!
//! PQCBench configuration can be specified in a `pqcbench.toml` file in the project root.
//! The configuration is automatically discovered by walking up from the current directory.

use pqcbench_report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up by [`PqcConfig::discover`]
pub const CONFIG_FILE_NAME: &str = "pqcbench.toml";

/// Message signed by signature benchmarks unless configured otherwise
pub const DEFAULT_SIGN_MESSAGE: &str = "Test message for signing";

/// PQCBench configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PqcConfig {
    /// Runner configuration
    #[serde(default)]
    pub runner: RunnerConfig,
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
    /// Provider selection
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Runner configuration for benchmark execution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Timed iterations per operation
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Untimed warmup iterations per operation
    #[serde(default = "default_warmup")]
    pub warmup: usize,
    /// Drop IQR outliers before computing statistics
    #[serde(default)]
    pub remove_outliers: bool,
    /// IQR multiplier used when outlier removal is enabled
    #[serde(default = "default_outlier_multiplier")]
    pub outlier_multiplier: f64,
    /// Message signed by signature benchmarks
    #[serde(default = "default_message")]
    pub message: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            warmup: default_warmup(),
            remove_outliers: false,
            outlier_multiplier: default_outlier_multiplier(),
            message: default_message(),
        }
    }
}

fn default_iterations() -> usize {
    1000
}
fn default_warmup() -> usize {
    100
}
fn default_outlier_multiplier() -> f64 {
    1.5
}
fn default_message() -> String {
    DEFAULT_SIGN_MESSAGE.to_string()
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default output format: "json", "csv", "both", "human"
    #[serde(default)]
    pub format: OutputFormat,
    /// Output directory for per-algorithm result files
    #[serde(default = "default_output_dir")]
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            directory: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

/// Provider selection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Provider used when none is given on the command line
    #[serde(default)]
    pub default: Option<String>,
}

impl PqcConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Try to discover and load configuration by walking up from current directory
    pub fn discover() -> Option<Self> {
        let mut dir = std::env::current_dir().ok()?;
        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded configuration");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %config_path.display(), error = %e, "ignoring unreadable configuration");
                        None
                    }
                };
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# PQCBench Configuration

[runner]
# Timed iterations per operation
iterations = 1000
# Untimed warmup iterations per operation
warmup = 100
# Drop IQR outliers before computing statistics
remove_outliers = false
# IQR multiplier (bounds are [Q1 - k*IQR, Q3 + k*IQR])
outlier_multiplier = 1.5
# Message signed by signature benchmarks
message = "Test message for signing"

[output]
# Output format: json, csv, both, human
format = "json"
# Directory for per-algorithm result files
directory = "results"

[provider]
# Provider used when --provider is not given (uncomment to enable)
# default = "pqclean"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PqcConfig::default();
        assert_eq!(config.runner.iterations, 1000);
        assert_eq!(config.runner.warmup, 100);
        assert!(!config.runner.remove_outliers);
        assert!((config.runner.outlier_multiplier - 1.5).abs() < f64::EPSILON);
        assert_eq!(config.runner.message, DEFAULT_SIGN_MESSAGE);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.directory, PathBuf::from("results"));
        assert!(config.provider.default.is_none());
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
            [runner]
            iterations = 250
            remove_outliers = true

            [output]
            format = "both"
        "#;

        let config: PqcConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runner.iterations, 250);
        assert!(config.runner.remove_outliers);
        assert_eq!(config.output.format, OutputFormat::Both);
        // Defaults should still apply
        assert_eq!(config.runner.warmup, 100);
        assert_eq!(config.output.directory, PathBuf::from("results"));
    }

    #[test]
    fn test_unknown_format_rejected() {
        let toml_str = r#"
            [output]
            format = "xml"
        "#;
        assert!(toml::from_str::<PqcConfig>(toml_str).is_err());
    }

    #[test]
    fn test_default_toml_parses() {
        let default_toml = PqcConfig::default_toml();
        let config: PqcConfig = toml::from_str(&default_toml).unwrap();
        assert_eq!(config.runner.iterations, 1000);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("pqcbench-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[provider]\ndefault = \"pqclean\"\n").unwrap();

        let config = PqcConfig::load(&path).unwrap();
        assert_eq!(config.provider.default.as_deref(), Some("pqclean"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
