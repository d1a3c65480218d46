use std::io::Write;

use benchcmp::{BenchCmpError, load_document, parse_document};
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write");
    file
}

#[test]
fn test_load_returns_entries_in_file_order() {
    let file = write_temp(
        r#"{"benchmarks":[
            {"name":"B","cpu_time":2,"time_unit":"us"},
            {"name":"A","real_time":1},
            {"name":"A_mean","cpu_time":1,"run_type":"aggregate"}
        ]}"#,
    );
    let doc = load_document(file.path()).expect("document");
    let names: Vec<&str> = doc.benchmarks.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, ["B", "A", "A_mean"]);
    assert_eq!(doc.benchmarks[0].time_unit.as_deref(), Some("us"));
    assert_eq!(doc.benchmarks[1].cpu_time, None);
    assert_eq!(doc.benchmarks[2].run_type.as_deref(), Some("aggregate"));
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("dir");
    let path = dir.path().join("absent.json");
    let err = load_document(&path).unwrap_err();
    assert!(matches!(err, BenchCmpError::NotFound { .. }));
    assert!(err.to_string().contains("absent.json"));
}

#[test]
fn test_directory_is_not_found() {
    let dir = tempfile::tempdir().expect("dir");
    let err = load_document(dir.path()).unwrap_err();
    assert!(matches!(err, BenchCmpError::NotFound { .. }));
}

#[test]
fn test_invalid_json_is_malformed() {
    let file = write_temp("{not json");
    let err = load_document(file.path()).unwrap_err();
    assert!(matches!(err, BenchCmpError::MalformedInput { .. }));
}

#[test]
fn test_missing_benchmarks_field_is_malformed() {
    let err = parse_document("doc.json", r#"{"context":{}}"#).unwrap_err();
    match err {
        BenchCmpError::MalformedInput { path, reason } => {
            assert_eq!(path, "doc.json");
            assert!(reason.contains("benchmarks"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_empty_benchmarks_is_malformed() {
    let err = parse_document("doc.json", r#"{"benchmarks":[]}"#).unwrap_err();
    assert!(matches!(err, BenchCmpError::MalformedInput { .. }));
}

#[test]
fn test_non_array_benchmarks_is_malformed() {
    let err = parse_document("doc.json", r#"{"benchmarks":{"name":"a"}}"#).unwrap_err();
    assert!(matches!(err, BenchCmpError::MalformedInput { .. }));
}

#[test]
fn test_top_level_array_is_malformed() {
    let err = parse_document("doc.json", r#"[{"name":"a","cpu_time":1}]"#).unwrap_err();
    assert!(matches!(err, BenchCmpError::MalformedInput { .. }));
}

#[test]
fn test_integer_times_parse_as_floats() {
    let doc = parse_document("doc.json", r#"{"benchmarks":[{"name":"a","cpu_time":125}]}"#)
        .expect("document");
    assert_eq!(doc.benchmarks[0].cpu_time, Some(125.0));
}
