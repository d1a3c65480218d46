use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    BenchCmpError,
    document::{BenchmarkDocument, RawBenchmark},
};

const AGGREGATE_SUFFIXES: [&str; 4] = ["_mean", "_median", "_stddev", "_cv"];
const COMPLEXITY_MARKERS: [&str; 2] = ["BigO", "RMS"];
const AGGREGATE_RUN_TYPE: &str = "aggregate";

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TimeUnit {
    #[default]
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Other(String),
}

impl TimeUnit {
    pub fn parse(label: &str) -> Self {
        match label {
            "ns" => TimeUnit::Nanoseconds,
            "us" => TimeUnit::Microseconds,
            "ms" => TimeUnit::Milliseconds,
            other => TimeUnit::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TimeUnit::Nanoseconds => "ns",
            TimeUnit::Microseconds => "us",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Other(label) => label,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for TimeUnit {
    fn from(label: String) -> Self {
        TimeUnit::parse(&label)
    }
}

impl From<TimeUnit> for String {
    fn from(unit: TimeUnit) -> Self {
        unit.as_str().to_string()
    }
}

/// A single comparable measurement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkRecord {
    pub name: String,
    pub time: f64,
    pub unit: TimeUnit,
}

impl BenchmarkRecord {
    pub fn new<N: Into<String>>(name: N, time: f64, unit: TimeUnit) -> Self {
        Self {
            name: name.into(),
            time,
            unit,
        }
    }
}

/// True for summary rows (mean/median/stddev/cv), complexity rows and
/// anything tagged with `run_type: aggregate`.
pub fn is_aggregate(raw: &RawBenchmark) -> bool {
    AGGREGATE_SUFFIXES
        .iter()
        .any(|suffix| raw.name.ends_with(suffix))
        || COMPLEXITY_MARKERS
            .iter()
            .any(|marker| raw.name.contains(marker))
        || raw.run_type.as_deref() == Some(AGGREGATE_RUN_TYPE)
}

/// Time precedence is `cpu_time`, then `real_time`, then `time`.
pub fn extract(raw: &RawBenchmark) -> Result<BenchmarkRecord, BenchCmpError> {
    let time = raw
        .cpu_time
        .or(raw.real_time)
        .or(raw.time)
        .ok_or_else(|| BenchCmpError::missing_time(&raw.name))?;
    let unit = raw
        .time_unit
        .as_deref()
        .map(TimeUnit::parse)
        .unwrap_or_default();
    Ok(BenchmarkRecord::new(raw.name.clone(), time, unit))
}

pub fn extract_records(document: &BenchmarkDocument) -> Vec<BenchmarkRecord> {
    let mut records = Vec::with_capacity(document.len());
    for raw in &document.benchmarks {
        if is_aggregate(raw) {
            debug!(name = %raw.name, "skipping aggregate row");
            continue;
        }
        match extract(raw) {
            Ok(record) => records.push(record),
            Err(err) => debug!(name = %raw.name, "dropping entry: {err}"),
        }
    }
    records
}
