//! Loading of benchmark result documents.
//!
//! A document is the JSON emitted by Google Benchmark style tools: a top-level
//! `benchmarks` array of objects, optionally preceded by a `context` object.
//! Entries are returned exactly as written; filtering and time extraction live
//! in [`crate::extract`].

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::BenchCmpError;

/// One entry of the `benchmarks` array, unmodified.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawBenchmark {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub real_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_type: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawBenchmark {
    /// Entry carrying only a name and a `cpu_time`.
    pub fn with_cpu_time<N: Into<String>>(name: N, cpu_time: f64) -> Self {
        Self {
            name: name.into(),
            cpu_time: Some(cpu_time),
            real_time: None,
            time: None,
            time_unit: None,
            run_type: None,
            extra: Map::new(),
        }
    }

    pub fn unit(mut self, unit: &str) -> Self {
        self.time_unit = Some(unit.to_string());
        self
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BenchmarkDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    pub benchmarks: Vec<RawBenchmark>,
}

impl BenchmarkDocument {
    pub fn new(benchmarks: Vec<RawBenchmark>) -> Self {
        Self {
            context: None,
            benchmarks,
        }
    }

    pub fn len(&self) -> usize {
        self.benchmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}

pub fn load_document<P: AsRef<Path>>(path: P) -> Result<BenchmarkDocument, BenchCmpError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(BenchCmpError::not_found(path));
    }
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
            BenchCmpError::not_found(path)
        }
        _ => BenchCmpError::malformed(path, e.to_string()),
    })?;
    let document = parse_document(path, &text)?;
    info!(
        path = %path.display(),
        entries = document.len(),
        "loaded benchmark document"
    );
    Ok(document)
}

/// Parses `text` as a benchmark document; `source` is only used in error messages.
pub fn parse_document<P: AsRef<Path>>(
    source: P,
    text: &str,
) -> Result<BenchmarkDocument, BenchCmpError> {
    let source = source.as_ref();
    let value: Value = serde_json::from_str(text)
        .map_err(|e| BenchCmpError::malformed(source, format!("invalid JSON: {e}")))?;
    let object = value
        .as_object()
        .ok_or_else(|| BenchCmpError::malformed(source, "top level must be an object"))?;
    match object.get("benchmarks") {
        None => return Err(BenchCmpError::malformed(source, "missing 'benchmarks' field")),
        Some(Value::Array(entries)) if entries.is_empty() => {
            return Err(BenchCmpError::malformed(source, "'benchmarks' is empty"));
        }
        Some(Value::Array(_)) => {}
        Some(_) => {
            return Err(BenchCmpError::malformed(
                source,
                "'benchmarks' must be an array",
            ));
        }
    }
    serde_json::from_value(value).map_err(|e| BenchCmpError::malformed(source, e.to_string()))
}
