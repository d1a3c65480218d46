//! Rendering of a [`Comparison`] into the text or JSON report.
//!
//! Section order and sorting are fixed so two runs over the same inputs
//! always produce byte-identical output.

use clap::ValueEnum;
use serde::Serialize;

use crate::{
    BenchCmpError,
    compare::{CompareConfig, Comparison, ComparisonResult, IMPROVEMENT_THRESHOLD, NewBenchmark},
    extract::TimeUnit,
};

const RULE_WIDTH: usize = 80;
/// Unchanged benchmarks are listed one by one up to this count.
pub const UNCHANGED_LIST_LIMIT: usize = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct ReportContext<'a> {
    pub baseline: &'a str,
    pub current: &'a str,
    pub config: &'a CompareConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Report {
    pub text: String,
    pub has_regression: bool,
    pub has_warning: bool,
}

pub fn render(
    comparison: &Comparison,
    ctx: &ReportContext<'_>,
    format: ReportFormat,
) -> Result<Report, BenchCmpError> {
    match format {
        ReportFormat::Text => Ok(render_report(comparison, ctx)),
        ReportFormat::Json => Ok(Report {
            text: render_json(comparison, ctx)?,
            has_regression: comparison.has_regression(),
            has_warning: comparison.has_warning(),
        }),
    }
}

pub fn render_report(comparison: &Comparison, ctx: &ReportContext<'_>) -> Report {
    Report {
        text: render_text(comparison, ctx),
        has_regression: comparison.has_regression(),
        has_warning: comparison.has_warning(),
    }
}

/// Scales `value` to the largest unit that keeps it above one and renders it
/// with two decimals in a ten character field.
pub fn format_time(value: f64, unit: &TimeUnit) -> String {
    match unit {
        TimeUnit::Nanoseconds if value > 1_000_000.0 => format!("{:10.2} ms", value / 1_000_000.0),
        TimeUnit::Nanoseconds if value > 1_000.0 => format!("{:10.2} us", value / 1_000.0),
        TimeUnit::Nanoseconds => format!("{value:10.2} ns"),
        TimeUnit::Microseconds if value > 1_000.0 => format!("{:10.2} ms", value / 1_000.0),
        TimeUnit::Microseconds => format!("{value:10.2} us"),
        TimeUnit::Milliseconds if value > 1_000.0 => format!("{:10.2} s", value / 1_000.0),
        TimeUnit::Milliseconds => format!("{value:10.2} ms"),
        TimeUnit::Other(label) => format!("{value:10.2} {label}"),
    }
}

fn threshold_pct(threshold: f64) -> f64 {
    (threshold - 1.0) * 100.0
}

fn sorted_by_change(results: &[ComparisonResult], descending: bool) -> Vec<&ComparisonResult> {
    let mut sorted: Vec<&ComparisonResult> = results.iter().collect();
    sorted.sort_by(|a, b| {
        let ord = a.change_pct.total_cmp(&b.change_pct);
        if descending { ord.reverse() } else { ord }
    });
    sorted
}

struct TextReport {
    lines: Vec<String>,
}

impl TextReport {
    fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn line<T: Into<String>>(&mut self, line: T) {
        self.lines.push(line.into());
    }

    fn rule(&mut self, ch: char) {
        self.lines.push(ch.to_string().repeat(RULE_WIDTH));
    }

    fn section(&mut self, title: String) {
        self.line(title);
        self.rule('-');
    }

    fn result(&mut self, result: &ComparisonResult, marker: &str) {
        self.line(format!("  {}", result.name));
        self.line(format!(
            "    Baseline: {}",
            format_time(result.baseline, &result.unit)
        ));
        self.line(format!(
            "    Current:  {}",
            format_time(result.current, &result.unit)
        ));
        self.line(format!("    Change:   {:+.1}%{marker}", result.change_pct));
        self.line("");
    }

    fn new_benchmark(&mut self, bench: &NewBenchmark) {
        self.line(format!("  {}", bench.name));
        self.line(format!("    Time: {}", format_time(bench.time, &bench.unit)));
        self.line("");
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}

fn render_text(comparison: &Comparison, ctx: &ReportContext<'_>) -> String {
    let config = ctx.config;
    let mut out = TextReport::new();

    out.rule('=');
    out.line("PERFORMANCE COMPARISON REPORT");
    out.rule('=');
    out.line(format!("Baseline: {}", ctx.baseline));
    out.line(format!("Current:  {}", ctx.current));
    out.line(format!(
        "Regression threshold: {:.0}%",
        threshold_pct(config.regression_threshold)
    ));
    out.rule('=');
    out.line("");

    if comparison.has_regression() {
        out.section(format!(
            "🔴 PERFORMANCE REGRESSIONS (>{:.0}% slower):",
            threshold_pct(config.regression_threshold)
        ));
        for result in sorted_by_change(&comparison.regressions, true) {
            out.result(result, "  ⚠️");
        }
    }

    if comparison.has_warning() {
        out.section(format!(
            "🟡 PERFORMANCE WARNINGS (>{:.0}% slower):",
            threshold_pct(config.warning_threshold)
        ));
        for result in sorted_by_change(&comparison.warnings, true) {
            out.result(result, "");
        }
    }

    if !comparison.improvements.is_empty() {
        out.section(format!(
            "🟢 PERFORMANCE IMPROVEMENTS (>{:.0}% faster):",
            (1.0 - IMPROVEMENT_THRESHOLD) * 100.0
        ));
        for result in sorted_by_change(&comparison.improvements, false) {
            out.result(result, "  ✓");
        }
    }

    if !comparison.new.is_empty() {
        out.section("🆕 NEW BENCHMARKS:".to_string());
        for bench in &comparison.new {
            out.new_benchmark(bench);
        }
    }

    if !comparison.unchanged.is_empty() {
        out.section("⚪ UNCHANGED:".to_string());
        if comparison.unchanged.len() <= UNCHANGED_LIST_LIMIT {
            for result in &comparison.unchanged {
                out.line(format!(
                    "  {:<40} {}  ({:+.1}%)",
                    result.name,
                    format_time(result.current, &result.unit),
                    result.change_pct
                ));
            }
        } else {
            out.line(format!(
                "  {} benchmarks within thresholds",
                comparison.unchanged.len()
            ));
        }
        out.line("");
    }

    out.rule('=');
    out.line("SUMMARY:");
    out.rule('-');
    out.line(format!("  Total benchmarks:    {}", comparison.total()));
    out.line(format!("  Regressions:         {}", comparison.regressions.len()));
    out.line(format!("  Warnings:            {}", comparison.warnings.len()));
    out.line(format!("  Improvements:        {}", comparison.improvements.len()));
    out.line(format!("  Unchanged:           {}", comparison.unchanged.len()));
    out.line(format!("  New:                 {}", comparison.new.len()));
    out.rule('=');

    out.line("");
    if comparison.has_regression() {
        out.line("❌ PERFORMANCE REGRESSION DETECTED!");
        out.line(format!(
            "   {} benchmark(s) are >{:.0}% slower than baseline.",
            comparison.regressions.len(),
            threshold_pct(config.regression_threshold)
        ));
        out.line("   Please investigate before merging.");
    } else if comparison.has_warning() {
        out.line("⚠️  PERFORMANCE WARNING");
        out.line(format!(
            "   {} benchmark(s) are slightly slower than baseline.",
            comparison.warnings.len()
        ));
        out.line("   Consider reviewing these changes.");
    } else {
        out.line("✅ No significant performance regressions detected.");
        if !comparison.improvements.is_empty() {
            out.line(format!(
                "   {} benchmark(s) improved!",
                comparison.improvements.len()
            ));
        }
    }
    out.rule('=');

    out.finish()
}

#[derive(Serialize)]
struct JsonSummary {
    total: usize,
    regressions: usize,
    warnings: usize,
    improvements: usize,
    unchanged: usize,
    new: usize,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    baseline: &'a str,
    current: &'a str,
    regression_threshold: f64,
    warning_threshold: f64,
    regressions: Vec<&'a ComparisonResult>,
    warnings: Vec<&'a ComparisonResult>,
    improvements: Vec<&'a ComparisonResult>,
    new: &'a [NewBenchmark],
    unchanged: &'a [ComparisonResult],
    summary: JsonSummary,
    has_regression: bool,
    has_warning: bool,
}

fn render_json(comparison: &Comparison, ctx: &ReportContext<'_>) -> Result<String, BenchCmpError> {
    let report = JsonReport {
        baseline: ctx.baseline,
        current: ctx.current,
        regression_threshold: ctx.config.regression_threshold,
        warning_threshold: ctx.config.warning_threshold,
        regressions: sorted_by_change(&comparison.regressions, true),
        warnings: sorted_by_change(&comparison.warnings, true),
        improvements: sorted_by_change(&comparison.improvements, false),
        new: &comparison.new,
        unchanged: &comparison.unchanged,
        summary: JsonSummary {
            total: comparison.total(),
            regressions: comparison.regressions.len(),
            warnings: comparison.warnings.len(),
            improvements: comparison.improvements.len(),
            unchanged: comparison.unchanged.len(),
            new: comparison.new.len(),
        },
        has_regression: comparison.has_regression(),
        has_warning: comparison.has_warning(),
    };
    serde_json::to_string_pretty(&report)
        .map_err(|e| BenchCmpError::invalid_input(format!("report serialization failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_scales_each_unit() {
        assert_eq!(format_time(999.0, &TimeUnit::Nanoseconds), "    999.00 ns");
        assert_eq!(format_time(1_500.0, &TimeUnit::Nanoseconds), "      1.50 us");
        assert_eq!(format_time(2_500_000.0, &TimeUnit::Nanoseconds), "      2.50 ms");
        assert_eq!(format_time(1_000.0, &TimeUnit::Microseconds), "   1000.00 us");
        assert_eq!(format_time(1_001.0, &TimeUnit::Microseconds), "      1.00 ms");
        assert_eq!(format_time(4_200.0, &TimeUnit::Milliseconds), "      4.20 s");
        assert_eq!(
            format_time(3.0, &TimeUnit::Other("s".into())),
            "      3.00 s"
        );
    }
}
