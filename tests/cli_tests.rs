use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

const BASELINE: &str = r#"{"benchmarks":[{"name":"Insert","cpu_time":100,"time_unit":"ns"}]}"#;

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

fn pair(current: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().expect("dir");
    let baseline = write(dir.path(), "baseline.json", BASELINE);
    let current = write(dir.path(), "current.json", current);
    (dir, baseline, current)
}

fn benchcmp() -> Command {
    Command::new(env!("CARGO_BIN_EXE_benchcmp"))
}

fn stdout_of(cmd: &mut Command, code: i32) -> String {
    let assert = cmd.assert().code(code);
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

#[test]
fn test_cli_exits_with_success_on_help() {
    benchcmp().arg("--help").assert().success();
}

#[test]
fn test_cli_regression_exits_one() {
    let (_dir, baseline, current) =
        pair(r#"{"benchmarks":[{"name":"Insert","cpu_time":125,"time_unit":"ns"}]}"#);
    let out = stdout_of(benchcmp().args([&baseline, &current]), 1);
    assert!(out.contains("PERFORMANCE REGRESSIONS (>20% slower)"));
    assert!(out.contains("Change:   +25.0%"));
}

#[test]
fn test_cli_unchanged_exits_zero() {
    let (_dir, baseline, current) =
        pair(r#"{"benchmarks":[{"name":"Insert","cpu_time":105,"time_unit":"ns"}]}"#);
    let out = stdout_of(benchcmp().args([&baseline, &current]), 0);
    assert!(out.contains("No significant performance regressions detected."));
}

#[test]
fn test_cli_aggregate_rows_and_new_benchmarks() {
    let (_dir, baseline, current) = pair(
        r#"{"benchmarks":[
            {"name":"Insert","cpu_time":100,"time_unit":"ns"},
            {"name":"Lookup_mean","cpu_time":1},
            {"name":"Delete","cpu_time":500,"time_unit":"us"}
        ]}"#,
    );
    let out = stdout_of(benchcmp().args([&baseline, &current]), 0);
    assert!(!out.contains("Lookup_mean"));
    assert!(out.contains("NEW BENCHMARKS"));
    assert!(out.contains("    500.00 us"));
}

#[test]
fn test_cli_warning_respects_fail_on_warning() {
    let (_dir, baseline, current) =
        pair(r#"{"benchmarks":[{"name":"Insert","cpu_time":115,"time_unit":"ns"}]}"#);
    let out = stdout_of(benchcmp().args([&baseline, &current]), 0);
    assert!(out.contains("PERFORMANCE WARNING"));
    benchcmp()
        .args([&baseline, &current])
        .arg("--fail-on-warning")
        .assert()
        .code(1);
}

#[test]
fn test_cli_threshold_flag_moves_the_gate() {
    let (_dir, baseline, current) =
        pair(r#"{"benchmarks":[{"name":"Insert","cpu_time":125,"time_unit":"ns"}]}"#);
    benchcmp()
        .args([&baseline, &current])
        .args(["--threshold", "1.30", "--warning-threshold", "1.25"])
        .assert()
        .code(0);
}

#[test]
fn test_cli_missing_file_exits_one_with_message() {
    let dir = tempfile::tempdir().expect("dir");
    let baseline = write(dir.path(), "baseline.json", BASELINE);
    let missing = dir.path().join("nope.json");
    let out = stdout_of(benchcmp().args([&baseline, &missing]), 1);
    assert!(out.starts_with("Error: File '"));
    assert!(out.contains("nope.json"));
    assert!(out.contains("not found"));
}

#[test]
fn test_cli_malformed_file_exits_one() {
    let (_dir, baseline, current) = pair(r#"{"runs":[]}"#);
    let out = stdout_of(benchcmp().args([&baseline, &current]), 1);
    assert!(out.contains("Error: "));
    assert!(out.contains("benchmarks"));
}

#[test]
fn test_cli_inverted_thresholds_exit_one() {
    let (_dir, baseline, current) = pair(BASELINE);
    let out = stdout_of(
        benchcmp()
            .args([&baseline, &current])
            .args(["--threshold", "1.05", "--warning-threshold", "1.10"]),
        1,
    );
    assert!(out.contains("--warning-threshold"));
}

#[test]
fn test_cli_json_format_and_output_file() {
    let (dir, baseline, current) =
        pair(r#"{"benchmarks":[{"name":"Insert","cpu_time":125,"time_unit":"ns"}]}"#);
    let report = dir.path().join("report.json");
    benchcmp()
        .args([&baseline, &current])
        .args(["--format", "json", "--output"])
        .arg(&report)
        .assert()
        .code(1);
    let value: Value =
        serde_json::from_str(&std::fs::read_to_string(&report).expect("report")).expect("json");
    assert_eq!(value["has_regression"], true);
    assert_eq!(value["regressions"][0]["name"], "Insert");
}
