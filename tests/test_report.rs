use survivor::error::ReportError;
use survivor::report::{MutantStatus, MutationReport, Position};
use tempfile::TempDir;

const REPORT: &str = r#"{
  "schemaVersion": "1.0",
  "files": {
    "src/b.ts": {
      "language": "typescript",
      "source": "export const b = 1;\n",
      "mutants": [
        {
          "id": "1",
          "mutatorName": "ConditionalExpression",
          "replacement": "true",
          "status": "Survived",
          "location": { "start": { "line": 3, "column": 4 }, "end": { "line": 3, "column": 10 } },
          "coveredBy": ["t1"]
        },
        { "id": "2", "mutatorName": "BlockStatement", "replacement": "{}", "status": "Killed",
          "location": { "start": { "line": 1, "column": 0 }, "end": { "line": 1, "column": 1 } } }
      ]
    },
    "src/a.ts": { "mutants": [] }
  },
  "testFiles": {
    "src/b.spec.ts": { "tests": [ { "id": "t1", "name": "computes total",
      "location": { "start": { "line": 8, "column": 2 } } } ] }
  }
}"#;

#[test]
fn parses_files_in_report_order() {
    let report = MutationReport::parse(REPORT).unwrap();
    let names: Vec<_> = report.files.keys().cloned().collect();
    assert_eq!(names, vec!["src/b.ts", "src/a.ts"]);
}

#[test]
fn parses_mutant_fields() {
    let report = MutationReport::parse(REPORT).unwrap();
    let mutant = &report.files["src/b.ts"].mutants[0];
    assert_eq!(mutant.mutator_name, "ConditionalExpression");
    assert_eq!(mutant.replacement, "true");
    assert!(mutant.is_survivor());
    assert_eq!(mutant.covered_by(), ["t1".to_string()]);
    assert_eq!(
        mutant.span(),
        Some((Position::new(3, 4), Position::new(3, 10)))
    );
    assert_eq!(report.files["src/b.ts"].mutants[1].status(), MutantStatus::Killed);
}

#[test]
fn keeps_embedded_source() {
    let report = MutationReport::parse(REPORT).unwrap();
    assert_eq!(
        report.files["src/b.ts"].source.as_deref(),
        Some("export const b = 1;\n")
    );
    assert!(report.files["src/a.ts"].source.is_none());
}

#[test]
fn parses_test_files() {
    let report = MutationReport::parse(REPORT).unwrap();
    let tests = &report.test_files["src/b.spec.ts"].tests;
    assert_eq!(tests[0].name, "computes total");
    assert_eq!(tests[0].start_line(), Some(8));
}

#[test]
fn counts_survivors() {
    let report = MutationReport::parse(REPORT).unwrap();
    assert_eq!(report.survivor_count(), 1);
}

#[test]
fn test_files_are_optional() {
    let report = MutationReport::parse(r#"{"files": {}}"#).unwrap();
    assert!(report.files.is_empty());
    assert!(report.test_files.is_empty());
}

#[test]
fn missing_files_key_is_rejected() {
    let err = MutationReport::parse(r#"{"testFiles": {}}"#).unwrap_err();
    assert!(matches!(err, ReportError::MissingFiles));
}

#[test]
fn invalid_json_is_rejected() {
    let err = MutationReport::parse("{ not json").unwrap_err();
    assert!(matches!(err, ReportError::Json(_)));
}

#[test]
fn missing_mutants_default_to_empty() {
    let report = MutationReport::parse(r#"{"files": {"a.ts": {}}}"#).unwrap();
    assert!(report.files["a.ts"].mutants.is_empty());
}

#[test]
fn malformed_mutant_entries_are_dropped() {
    let data = r#"{"files": {"a.ts": {"mutants": [
        "not an object",
        {"mutatorName": "X", "status": "Survived", "location": {"start": {"line": "one"}}},
        {"mutatorName": "Y", "status": "Survived"}
    ]}}}"#;
    let report = MutationReport::parse(data).unwrap();
    let mutants = &report.files["a.ts"].mutants;
    assert_eq!(mutants.len(), 1);
    assert_eq!(mutants[0].mutator_name, "Y");
    assert!(mutants[0].span().is_none());
}

#[test]
fn missing_status_never_survives() {
    let report = MutationReport::parse(r#"{"files": {"a.ts": {"mutants": [{}]}}}"#).unwrap();
    assert!(!report.files["a.ts"].mutants[0].is_survivor());
}

#[test]
fn null_covered_by_is_empty() {
    let data = r#"{"files": {"a.ts": {"mutants": [{"status": "Survived", "coveredBy": null}]}}}"#;
    let report = MutationReport::parse(data).unwrap();
    assert!(report.files["a.ts"].mutants[0].covered_by().is_empty());
}

#[test]
fn load_reads_from_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(&path, REPORT).unwrap();
    let report = MutationReport::load(&path).unwrap();
    assert_eq!(report.files.len(), 2);
}

#[test]
fn load_missing_file_is_io_error() {
    let err = MutationReport::load(std::path::Path::new("/nonexistent/report.json")).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }));
}

#[test]
fn null_test_file_entry_is_dropped() {
    let data = r#"{"files": {"a.ts": {"mutants": []}},
        "testFiles": {"x.spec.ts": null, "y.spec.ts": {"tests": [{"id": "t1", "name": "works"}]}}}"#;
    let report = MutationReport::parse(data).unwrap();
    assert_eq!(report.files.len(), 1);
    let names: Vec<_> = report.test_files.keys().cloned().collect();
    assert_eq!(names, vec!["y.spec.ts"]);
}

#[test]
fn malformed_file_entry_keeps_the_rest() {
    let data = r#"{"files": {
        "a.ts": {"mutants": [{"mutatorName": "A", "status": "Survived"}]},
        "b.ts": {"mutants": "oops"},
        "c.ts": null
    }}"#;
    let report = MutationReport::parse(data).unwrap();
    let names: Vec<_> = report.files.keys().cloned().collect();
    assert_eq!(names, vec!["a.ts"]);
    assert_eq!(report.files["a.ts"].mutants.len(), 1);
}

#[test]
fn null_string_fields_default_to_empty() {
    let data = r#"{"files": {"a.ts": {"mutants": [
        {"mutatorName": null, "replacement": null, "status": "Survived",
         "location": {"start": {"line": 1, "column": 0}, "end": {"line": 1, "column": 2}}}
    ]}}}"#;
    let report = MutationReport::parse(data).unwrap();
    let mutants = &report.files["a.ts"].mutants;
    assert_eq!(mutants.len(), 1);
    assert!(mutants[0].is_survivor());
    assert_eq!(mutants[0].replacement, "");
    assert_eq!(mutants[0].mutator_name, "");
    assert!(mutants[0].span().is_some());
}

#[test]
fn null_files_is_still_missing_files() {
    let err = MutationReport::parse(r#"{"files": null}"#).unwrap_err();
    assert!(matches!(err, ReportError::MissingFiles));
}
