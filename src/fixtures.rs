use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::{Map, Value};

use crate::document::{BenchmarkDocument, RawBenchmark};

/// A baseline/current pair produced from a single seed.
#[derive(Clone, Debug)]
pub struct SuitePair {
    pub baseline: BenchmarkDocument,
    pub current: BenchmarkDocument,
}

#[derive(Clone, Debug)]
pub struct SuiteShape {
    pub benchmarks: usize,
    /// Largest relative change applied to a current time, e.g. 0.3 for ±30%.
    pub max_drift: f64,
    /// Emit `_mean`/`_median`/`_stddev` rows after every measurement.
    pub with_aggregates: bool,
    /// Current-only benchmarks appended after the shared ones.
    pub new_benchmarks: usize,
}

impl Default for SuiteShape {
    fn default() -> Self {
        Self {
            benchmarks: 100,
            max_drift: 0.3,
            with_aggregates: true,
            new_benchmarks: 5,
        }
    }
}

pub fn generate_suite(shape: &SuiteShape, seed: u64) -> SuitePair {
    assert!(shape.max_drift >= 0.0, "max_drift must be non-negative");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut baseline = Vec::new();
    let mut current = Vec::new();
    for idx in 0..shape.benchmarks {
        let name = format!("BM_Case/{idx}");
        let unit = pick_unit(&mut rng);
        let base_time = rng.gen_range(10.0..50_000.0);
        let drift = if shape.max_drift > 0.0 {
            rng.gen_range(-shape.max_drift..=shape.max_drift)
        } else {
            0.0
        };
        let cur_time = base_time * (1.0 + drift);
        push_measurement(&mut baseline, &name, base_time, unit, shape.with_aggregates);
        push_measurement(&mut current, &name, cur_time, unit, shape.with_aggregates);
    }
    for idx in 0..shape.new_benchmarks {
        let time = rng.gen_range(10.0..50_000.0);
        current.push(RawBenchmark::with_cpu_time(format!("BM_New/{idx}"), time).unit("ns"));
    }
    SuitePair {
        baseline: BenchmarkDocument::new(baseline),
        current: BenchmarkDocument::new(current),
    }
}

/// Serializes a document the way Google Benchmark lays it out.
pub fn to_json(document: &BenchmarkDocument) -> String {
    serde_json::to_string_pretty(document).unwrap_or_else(|_| String::from("{}"))
}

fn pick_unit(rng: &mut StdRng) -> &'static str {
    match rng.gen_range(0..3) {
        0 => "ns",
        1 => "us",
        _ => "ms",
    }
}

fn push_measurement(
    out: &mut Vec<RawBenchmark>,
    name: &str,
    time: f64,
    unit: &str,
    with_aggregates: bool,
) {
    let mut raw = RawBenchmark::with_cpu_time(name, time).unit(unit);
    raw.real_time = Some(time * 1.02);
    raw.run_type = Some("iteration".into());
    raw.extra.insert("iterations".into(), Value::from(1000));
    out.push(raw);
    if !with_aggregates {
        return;
    }
    for suffix in ["mean", "median", "stddev"] {
        let mut agg = RawBenchmark::with_cpu_time(format!("{name}_{suffix}"), time).unit(unit);
        agg.run_type = Some("aggregate".into());
        let mut extra = Map::new();
        extra.insert("aggregate_name".into(), Value::from(suffix));
        agg.extra = extra;
        out.push(agg);
    }
}
