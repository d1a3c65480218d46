//! Benchmark result comparison and regression gating.
//!
//! Loads a baseline and a current Google Benchmark style JSON file, drops
//! aggregate rows, joins the remaining measurements by name and buckets each
//! one by its current/baseline time ratio. Run Criterion benchmarks with
//! `cargo bench` to measure the pipeline itself.

pub mod cli;
pub mod compare;
pub mod document;
pub mod errors;
pub mod extract;
pub mod fixtures;
pub mod report;

use std::path::Path;

pub use crate::compare::{
    Classification, CompareConfig, Comparison, ComparisonResult, NewBenchmark, compare,
};
pub use crate::document::{BenchmarkDocument, RawBenchmark, load_document, parse_document};
pub use crate::errors::BenchCmpError;
pub use crate::extract::{BenchmarkRecord, TimeUnit, extract, extract_records, is_aggregate};
pub use crate::report::{Report, ReportContext, ReportFormat, format_time, render, render_report};

/// Loads both files and compares their filtered records.
pub fn compare_files<P: AsRef<Path>, Q: AsRef<Path>>(
    baseline: P,
    current: Q,
    config: &CompareConfig,
) -> Result<Comparison, BenchCmpError> {
    let baseline = extract_records(&load_document(baseline)?);
    let current = extract_records(&load_document(current)?);
    Ok(compare(&baseline, &current, config))
}
