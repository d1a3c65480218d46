use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    BenchCmpError,
    extract::{BenchmarkRecord, TimeUnit},
};

pub const DEFAULT_REGRESSION_THRESHOLD: f64 = 1.20;
pub const DEFAULT_WARNING_THRESHOLD: f64 = 1.10;
/// Ratios below this count as an improvement.
pub const IMPROVEMENT_THRESHOLD: f64 = 0.90;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    pub regression_threshold: f64,
    pub warning_threshold: f64,
    pub fail_on_warning: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            regression_threshold: DEFAULT_REGRESSION_THRESHOLD,
            warning_threshold: DEFAULT_WARNING_THRESHOLD,
            fail_on_warning: false,
        }
    }
}

impl CompareConfig {
    pub fn validate(&self) -> Result<(), BenchCmpError> {
        for (flag, value) in [
            ("--threshold", self.regression_threshold),
            ("--warning-threshold", self.warning_threshold),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BenchCmpError::invalid_input(format!(
                    "{flag} must be a positive number, got {value}"
                )));
            }
        }
        if self.warning_threshold > self.regression_threshold {
            return Err(BenchCmpError::invalid_input(format!(
                "--warning-threshold {} exceeds --threshold {}",
                self.warning_threshold, self.regression_threshold
            )));
        }
        Ok(())
    }

    /// Checks are ordered so a ratio above both thresholds is only a regression.
    pub fn classify(&self, ratio: f64) -> Classification {
        if ratio > self.regression_threshold {
            Classification::Regression
        } else if ratio > self.warning_threshold {
            Classification::Warning
        } else if ratio < IMPROVEMENT_THRESHOLD {
            Classification::Improvement
        } else {
            Classification::Unchanged
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Regression,
    Warning,
    Improvement,
    Unchanged,
    New,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub name: String,
    pub baseline: f64,
    pub current: f64,
    pub unit: TimeUnit,
    pub ratio: f64,
    pub change_pct: f64,
    pub classification: Classification,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewBenchmark {
    pub name: String,
    pub time: f64,
    pub unit: TimeUnit,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub regressions: Vec<ComparisonResult>,
    pub warnings: Vec<ComparisonResult>,
    pub improvements: Vec<ComparisonResult>,
    pub unchanged: Vec<ComparisonResult>,
    pub new: Vec<NewBenchmark>,
}

impl Comparison {
    pub fn has_regression(&self) -> bool {
        !self.regressions.is_empty()
    }

    pub fn has_warning(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Number of current records that had a baseline counterpart.
    pub fn total(&self) -> usize {
        self.regressions.len() + self.warnings.len() + self.improvements.len() + self.unchanged.len()
    }

    pub fn should_fail(&self, config: &CompareConfig) -> bool {
        self.has_regression() || (config.fail_on_warning && self.has_warning())
    }

    /// Every matched result, in bucket order.
    pub fn matched(&self) -> impl Iterator<Item = &ComparisonResult> {
        self.regressions
            .iter()
            .chain(&self.warnings)
            .chain(&self.improvements)
            .chain(&self.unchanged)
    }

    fn push(&mut self, result: ComparisonResult) {
        match result.classification {
            Classification::Regression => self.regressions.push(result),
            Classification::Warning => self.warnings.push(result),
            Classification::Improvement => self.improvements.push(result),
            Classification::Unchanged | Classification::New => self.unchanged.push(result),
        }
    }
}

/// Joins `current` against `baseline` by name and buckets every current record.
///
/// Duplicate baseline names resolve to the last occurrence. Baseline-only
/// names are not reported. No unit conversion happens: the ratio is taken on
/// the raw values even when the declared units differ.
pub fn compare(
    baseline: &[BenchmarkRecord],
    current: &[BenchmarkRecord],
    config: &CompareConfig,
) -> Comparison {
    let lookup: AHashMap<&str, &BenchmarkRecord> = baseline
        .iter()
        .map(|record| (record.name.as_str(), record))
        .collect();

    let mut comparison = Comparison::default();
    for record in current {
        let Some(base) = lookup.get(record.name.as_str()) else {
            comparison.new.push(NewBenchmark {
                name: record.name.clone(),
                time: record.time,
                unit: record.unit.clone(),
            });
            continue;
        };
        if base.unit != record.unit {
            warn!(
                name = %record.name,
                baseline_unit = %base.unit,
                current_unit = %record.unit,
                "time units differ; ratio uses raw values"
            );
        }
        let ratio = record.time / base.time;
        comparison.push(ComparisonResult {
            name: record.name.clone(),
            baseline: base.time,
            current: record.time,
            unit: record.unit.clone(),
            ratio,
            change_pct: (ratio - 1.0) * 100.0,
            classification: config.classify(ratio),
        });
    }

    let seen: AHashSet<&str> = current.iter().map(|record| record.name.as_str()).collect();
    let dropped = lookup.keys().filter(|name| !seen.contains(*name)).count();
    if dropped > 0 {
        debug!(dropped, "baseline benchmarks missing from current run");
    }
    comparison
}
