#![warn(missing_docs)]
//! PQCBench CLI Library
//!
//! Benchmark engine and command-line harness. A binary builds a
//! [`ProviderRegistry`], registers its providers and hands it to [`run`].
//!
//! # Example
//!
//! ```ignore
//! use pqcbench_core::ProviderRegistry;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut registry = ProviderRegistry::new();
//!     registry.register(Box::new(MyProvider::default()))?;
//!     pqcbench_cli::run(registry)
//! }
//! ```

mod config;
mod executor;
mod planner;

pub use config::*;
pub use executor::{
    AlgorithmRun, ExecutionConfig, Executor, OperationStatistics, benchmark, benchmark_operation,
    compute_statistics, count_failures, format_run_summary,
};
pub use planner::{ExecutionPlan, PlannedAlgorithm, build_plan};

use anyhow::Context;
use clap::{Parser, Subcommand};
use pqcbench_core::{AlgorithmKind, Provider, ProviderRegistry, architecture, resolution};
use pqcbench_report::{
    OutputFormat, ResultSet, format_human_output, format_sizes_table, generate_csv_report,
    generate_json_report, generate_sizes_json,
};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// PQCBench CLI arguments
#[derive(Parser, Debug)]
#[command(name = "pqcbench")]
#[command(author, version, about = "PQCBench - latency benchmarks for post-quantum primitives")]
pub struct Cli {
    /// Optional subcommand (List, Run, Sizes, Init); defaults to Run
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Filter algorithms by regex pattern
    #[arg(default_value = ".*")]
    pub filter: String,

    /// Provider to take algorithms from (defaults to pqcbench.toml, then the first registered)
    #[arg(long, short = 'p')]
    pub provider: Option<String>,

    /// Only run algorithms of this kind: kem or signature
    #[arg(long)]
    pub kind: Option<AlgorithmKind>,

    /// Timed iterations per operation
    #[arg(long, short = 'i')]
    pub iterations: Option<usize>,

    /// Untimed warmup iterations per operation
    #[arg(long, short = 'w')]
    pub warmup: Option<usize>,

    /// Remove IQR outliers before computing statistics
    #[arg(long, short = 'r')]
    pub remove_outliers: bool,

    /// IQR multiplier for outlier removal
    #[arg(long)]
    pub outlier_multiplier: Option<f64>,

    /// Output format: json, csv, both, human
    #[arg(long, short = 'f')]
    pub format: Option<OutputFormat>,

    /// Directory for per-algorithm result files
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Message signed by signature benchmarks
    #[arg(long, short = 'm')]
    pub message: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Dry run - list algorithms without executing
    #[arg(long)]
    pub dry_run: bool,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the algorithms a provider offers
    List,
    /// Run benchmarks (default)
    Run,
    /// Print key, ciphertext and signature sizes
    Sizes,
    /// Write a default pqcbench.toml to the current directory
    Init,
}

/// Run the PQCBench CLI with the given providers.
/// This is the main entry point for benchmark binaries.
///
/// # Returns
/// Returns `Ok(())` on success, or an error if something goes wrong
/// (including any algorithm failing its benchmark).
pub fn run(registry: ProviderRegistry) -> anyhow::Result<()> {
    let cli = Cli::parse();
    run_with_cli(cli, &registry)
}

/// Run the PQCBench CLI with pre-parsed arguments.
pub fn run_with_cli(cli: Cli, registry: &ProviderRegistry) -> anyhow::Result<()> {
    init_logging(cli.verbose);

    // Discover pqcbench.toml configuration (CLI flags override)
    let config = PqcConfig::discover().unwrap_or_default();

    match cli.command {
        Some(Commands::List) => list_algorithms(&cli, &config, registry),
        Some(Commands::Run) => run_benchmarks(&cli, &config, registry),
        Some(Commands::Sizes) => print_sizes(&cli, &config, registry),
        Some(Commands::Init) => write_default_config(),
        None => {
            // Default: run benchmarks
            if cli.dry_run {
                list_algorithms(&cli, &config, registry)
            } else {
                run_benchmarks(&cli, &config, registry)
            }
        }
    }
}

/// Initialize the tracing subscriber; `RUST_LOG` overrides the default filter
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "pqcbench=debug"
    } else {
        "pqcbench=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A subscriber may already be installed when embedded in tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build an ExecutionConfig by layering: pqcbench.toml defaults → CLI overrides.
pub fn build_execution_config(cli: &Cli, config: &PqcConfig) -> ExecutionConfig {
    let mut exec = ExecutionConfig::from_file(config);

    if let Some(n) = cli.iterations {
        exec.iterations = n;
    }
    if let Some(n) = cli.warmup {
        exec.warmup_iterations = n;
    }
    if cli.remove_outliers {
        exec.remove_outliers = true;
    }
    if let Some(k) = cli.outlier_multiplier {
        exec.outlier_multiplier = k;
    }
    if let Some(format) = cli.format {
        exec.output_format = format;
    }
    if let Some(ref message) = cli.message {
        exec.message = message.clone();
    }
    exec.verbose = cli.verbose;

    exec
}

/// Pick the provider: CLI flag, then pqcbench.toml, then the first registered
fn resolve_provider<'a>(
    cli: &Cli,
    config: &PqcConfig,
    registry: &'a ProviderRegistry,
) -> anyhow::Result<&'a dyn Provider> {
    let requested = cli.provider.as_deref().or(config.provider.default.as_deref());
    match requested {
        Some(name) => registry.find(name).ok_or_else(|| {
            anyhow::anyhow!(
                "provider '{}' not registered (available: {})",
                name,
                registry.names().join(", ")
            )
        }),
        None => registry
            .iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("no providers registered")),
    }
}

/// Filter the provider's algorithms using the planner module.
fn plan_for(cli: &Cli, provider: &dyn Provider) -> anyhow::Result<ExecutionPlan> {
    let filter_re =
        Regex::new(&cli.filter).with_context(|| format!("invalid filter '{}'", cli.filter))?;
    Ok(build_plan(provider, Some(&filter_re), cli.kind))
}

fn list_algorithms(
    cli: &Cli,
    config: &PqcConfig,
    registry: &ProviderRegistry,
) -> anyhow::Result<()> {
    let provider = resolve_provider(cli, config, registry)?;
    let plan = plan_for(cli, provider)?;

    println!("PQCBench Plan:");
    println!("├── provider: {} {}", provider.name(), provider.version());

    for kind in [AlgorithmKind::Kem, AlgorithmKind::Signature] {
        let algs: Vec<_> = plan.algorithms.iter().filter(|a| a.kind == kind).collect();
        if algs.is_empty() {
            continue;
        }
        println!("│   ├── {}", kind);
        for alg in algs {
            println!(
                "│   │   ├── {} ({})",
                alg.name,
                kind.operations()
                    .iter()
                    .map(|op| op.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }
    }

    println!("{} algorithms found.", plan.algorithms.len());

    let others: Vec<&str> = registry
        .names()
        .into_iter()
        .filter(|n| *n != provider.name())
        .collect();
    if !others.is_empty() {
        println!("Other providers: {}", others.join(", "));
    }

    Ok(())
}

fn run_benchmarks(
    cli: &Cli,
    config: &PqcConfig,
    registry: &ProviderRegistry,
) -> anyhow::Result<()> {
    let exec_config = build_execution_config(cli, config);
    exec_config
        .validate()
        .context("invalid benchmark configuration")?;

    let provider = resolve_provider(cli, config, registry)?;
    let plan = plan_for(cli, provider)?;

    if plan.is_empty() {
        println!("No algorithms found.");
        return Ok(());
    }

    tracing::debug!(resolution_ns = resolution(), "timer ready");
    println!(
        "Running {} algorithms from {} {} on {} ({} iterations, {} warmup{})...\n",
        plan.algorithms.len(),
        provider.name(),
        provider.version(),
        architecture(),
        exec_config.iterations,
        exec_config.warmup_iterations,
        if exec_config.remove_outliers {
            format!(", IQR x{}", exec_config.outlier_multiplier)
        } else {
            String::new()
        }
    );

    let executor = Executor::new(exec_config.clone());
    let runs = executor.execute(provider, &plan);

    let output_dir = cli
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());

    let write_failures = write_reports(&runs, exec_config.output_format, &output_dir);

    print!("{}", format_run_summary(&runs));

    let failures = count_failures(&runs);
    match (failures, write_failures.len()) {
        (0, 0) => Ok(()),
        (0, unwritten) => Err(anyhow::anyhow!(
            "failed to write reports for {unwritten} algorithm(s)"
        )),
        (failed, 0) => Err(anyhow::anyhow!(
            "{} of {} algorithm(s) failed",
            failed,
            runs.len()
        )),
        (failed, unwritten) => Err(anyhow::anyhow!(
            "{} of {} algorithm(s) failed; failed to write reports for {} algorithm(s)",
            failed,
            runs.len(),
            unwritten
        )),
    }
}

/// Emit every successful result set, continuing past write errors.
///
/// Returns the algorithms whose reports could not be written.
fn write_reports(
    runs: &[AlgorithmRun],
    format: OutputFormat,
    dir: &Path,
) -> Vec<(String, anyhow::Error)> {
    let mut failures = Vec::new();
    for run in runs {
        let Ok(set) = &run.outcome else { continue };
        if let Err(err) = emit_results(set, format, dir) {
            let message = format!("{err:#}");
            tracing::error!(algorithm = %run.algorithm, error = %message, "report not written");
            eprintln!("Error: {}: {message}", run.algorithm);
            failures.push((run.algorithm.clone(), err));
        }
    }
    failures
}

/// Print or write one algorithm's results in the selected format
fn emit_results(set: &ResultSet, format: OutputFormat, dir: &Path) -> anyhow::Result<()> {
    if format == OutputFormat::Human {
        print!("{}", format_human_output(set));
        return Ok(());
    }

    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let stem = file_stem(&set.algorithm);

    if format.writes_json() {
        let path = dir.join(format!("{stem}.json"));
        std::fs::write(&path, generate_json_report(set)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Report written to: {}", path.display());
    }
    if format.writes_csv() {
        let path = dir.join(format!("{stem}.csv"));
        std::fs::write(&path, generate_csv_report(set))
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Report written to: {}", path.display());
    }

    Ok(())
}

/// Algorithm name made safe for use as a file name
fn file_stem(algorithm: &str) -> String {
    algorithm
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn print_sizes(cli: &Cli, config: &PqcConfig, registry: &ProviderRegistry) -> anyhow::Result<()> {
    let provider = resolve_provider(cli, config, registry)?;
    let plan = plan_for(cli, provider)?;
    let sizes: Vec<_> = plan.algorithms.into_iter().map(|a| a.sizes).collect();

    let format = cli.format.unwrap_or(OutputFormat::Human);
    if format == OutputFormat::Json {
        println!("{}", generate_sizes_json(architecture(), &sizes)?);
    } else {
        println!(
            "Artifact sizes in bytes ({} {}, {})\n",
            provider.name(),
            provider.version(),
            architecture()
        );
        print!("{}", format_sizes_table(&sizes));
    }

    Ok(())
}

fn write_default_config() -> anyhow::Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(anyhow::anyhow!("{} already exists", path.display()));
    }
    std::fs::write(path, PqcConfig::default_toml())?;
    println!("Wrote {}", path.display());
    Ok(())
}
