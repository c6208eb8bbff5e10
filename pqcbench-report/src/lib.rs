#![warn(missing_docs)]
//! PQCBench Report - Result Model and Output
//!
//! Generates various output formats:
//! - JSON (machine-readable, two-decimal latency fields)
//! - CSV (spreadsheet-compatible)
//! - Human-readable terminal output
//! - Artifact-size tables (text and JSON)

mod csv;
mod human;
mod json;
mod report;

pub use csv::{CSV_HEADER, generate_csv_report};
pub use human::{format_human_output, format_sizes_table};
pub use json::{generate_json_report, generate_sizes_json};
pub use report::{OperationMetrics, OperationResult, ResultSet};

use serde::{Deserialize, Serialize};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON file per algorithm
    #[default]
    Json,
    /// CSV file per algorithm
    Csv,
    /// Both JSON and CSV files
    Both,
    /// Human-readable terminal output
    Human,
}

impl OutputFormat {
    /// Whether a JSON file is produced
    pub fn writes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    /// Whether a CSV file is produced
    pub fn writes_csv(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Both)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Both => "both",
            OutputFormat::Human => "human",
        })
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "both" | "all" => Ok(OutputFormat::Both),
            "human" | "text" => Ok(OutputFormat::Human),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}
