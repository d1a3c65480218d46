use std::{fs, path::PathBuf};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    BenchCmpError,
    compare::{CompareConfig, DEFAULT_REGRESSION_THRESHOLD, DEFAULT_WARNING_THRESHOLD},
    compare_files,
    report::{Report, ReportContext, ReportFormat, render},
};

/// Compare benchmark results and detect performance regressions
#[derive(Parser, Clone, Debug, PartialEq)]
#[command(name = "benchcmp", version)]
pub struct CommandLineConfig {
    /// Baseline benchmark JSON file
    pub baseline: PathBuf,

    /// Current benchmark JSON file
    pub current: PathBuf,

    /// Regression threshold (1.20 = 20% slower)
    #[arg(long, default_value_t = DEFAULT_REGRESSION_THRESHOLD)]
    pub threshold: f64,

    /// Warning threshold (1.10 = 10% slower)
    #[arg(long = "warning-threshold", default_value_t = DEFAULT_WARNING_THRESHOLD)]
    pub warning_threshold: f64,

    /// Exit with an error code on warnings, not just regressions
    #[arg(long = "fail-on-warning")]
    pub fail_on_warning: bool,

    /// Report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Write the report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CommandLineConfig {
    pub fn compare_config(&self) -> CompareConfig {
        CompareConfig {
            regression_threshold: self.threshold,
            warning_threshold: self.warning_threshold,
            fail_on_warning: self.fail_on_warning,
        }
    }

    fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    pub report: Report,
    /// True when the process should exit non-zero.
    pub failed: bool,
}

/// Logs go to stderr so the report on stdout stays clean. `RUST_LOG` wins
/// over `-v`.
pub fn init_logging(config: &CommandLineConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(config: &CommandLineConfig) -> Result<RunOutcome, BenchCmpError> {
    let compare_config = config.compare_config();
    compare_config.validate()?;
    let comparison = compare_files(&config.baseline, &config.current, &compare_config)?;
    let baseline = config.baseline.display().to_string();
    let current = config.current.display().to_string();
    let ctx = ReportContext {
        baseline: &baseline,
        current: &current,
        config: &compare_config,
    };
    let report = render(&comparison, &ctx, config.format)?;
    let failed = comparison.should_fail(&compare_config);
    info!(
        regressions = comparison.regressions.len(),
        warnings = comparison.warnings.len(),
        failed,
        "comparison finished"
    );
    Ok(RunOutcome { report, failed })
}

/// Writes the report to `--output` when given, otherwise prints it.
pub fn emit(config: &CommandLineConfig, report: &Report) -> Result<(), BenchCmpError> {
    match &config.output {
        Some(path) => {
            let mut text = report.text.clone();
            text.push('\n');
            fs::write(path, text)
                .map_err(|e| BenchCmpError::io(format!("{}: {e}", path.display())))
        }
        None => {
            println!("{}", report.text);
            Ok(())
        }
    }
}
