//! Feature Parity CLI
//!
//! Compares feature registries extracted from SDKs in different languages.
//!
//! Usage:
//!   feature-parity --base py.json --target ts.json --output reports --report-type md
//!   feature-parity --registries py.json ts.json go.json --output reports --report-type matrix
//!   feature-parity --help

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Parser;
use feature_parity::{
    compute_matrix, output_filename, render_matrix, render_pairwise, FeatureRegistry, Matcher,
    ParityConfig, ParityError, ReportType,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "feature-parity")]
#[command(about = "Match SDK features across languages and report parity")]
struct Cli {
    /// Base registry (ground truth for directional reports)
    #[arg(short, long, requires = "target", conflicts_with = "registries")]
    base: Option<PathBuf>,

    /// Target registry compared against the base
    #[arg(short, long, requires = "base", conflicts_with = "registries")]
    target: Option<PathBuf>,

    /// Two or more registries for an N-way matrix
    #[arg(long, num_args = 2.., required_unless_present = "base")]
    registries: Vec<PathBuf>,

    /// Directory the report is written to (created if missing)
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Report type (symmetric, directional, raw, md, matrix)
    #[arg(short, long)]
    report_type: Option<String>,

    /// Minimum similarity for an accepted match, in [0, 1]
    #[arg(short, long)]
    alpha: Option<f64>,

    /// Namespace tokens used to group modules in the markdown report
    #[arg(long)]
    module_depth: Option<usize>,

    /// Explicit config file layered over the default locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    if let Err(e) = run(cli) {
        eprintln!("❌ Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref().map(|p| p.to_string_lossy().into_owned());
    let config = ParityConfig::load_from(config_path.as_deref())
        .context("Failed to load configuration")?;
    debug!(?config, "Loaded configuration");

    let alpha = cli.alpha.unwrap_or(config.matching.alpha);
    let module_depth = cli.module_depth.or(config.report.module_depth);
    let matcher = Matcher::from_config(&config)?;

    let (inputs, nway) = match (cli.base, cli.target) {
        (Some(base), Some(target)) => (vec![base, target], false),
        _ => (cli.registries, true),
    };

    let report_type: ReportType = match cli.report_type {
        Some(value) => value.parse()?,
        None if nway => ReportType::Matrix,
        None => config.report.default_type.parse()?,
    };
    check_mode(report_type, nway)?;

    let registries = inputs
        .iter()
        .map(|path| FeatureRegistry::load(path))
        .collect::<feature_parity::Result<Vec<_>>>()?;

    for (path, registry) in inputs.iter().zip(&registries) {
        info!(
            path = %path.display(),
            language = %registry.language(),
            features = registry.len(),
            "Loaded registry"
        );
    }

    let (languages, rendered) = if nway {
        let matrix = compute_matrix(&registries, &matcher, alpha)?;
        (matrix.languages.clone(), render_matrix(&matrix))
    } else {
        let result = matcher.match_registries(&registries[0], &registries[1], alpha)?;
        let languages = vec![result.base().language(), result.target().language()];
        (languages, render_pairwise(&result, report_type, module_depth)?)
    };

    let filename = output_filename(&languages, report_type);
    let path = write_report(&cli.output, &filename, &rendered)?;

    println!("✅ Report written to {}", path.display());
    Ok(())
}

/// Matrix reports need N-way input; every other report needs exactly one pair
fn check_mode(report_type: ReportType, nway: bool) -> anyhow::Result<()> {
    if report_type.is_pairwise() == nway {
        let mode = if nway { "n-way" } else { "pairwise" };
        bail!(ParityError::ReportTypeMode {
            report_type: report_type.to_string(),
            mode,
        });
    }
    Ok(())
}

fn write_report(dir: &Path, filename: &str, content: &str) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(filename);
    fs::write(&path, content)
        .with_context(|| format!("Failed to write report {}", path.display()))?;
    Ok(path)
}
