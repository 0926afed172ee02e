use indexmap::IndexMap;
use survivor::matcher;
use survivor::report::{Location, Position, TestFileReport, TestRecord};

fn test(id: &str, name: &str, line: usize) -> TestRecord {
    TestRecord {
        id: id.into(),
        name: name.into(),
        location: Some(Location {
            start: Some(Position::new(line, 2)),
            end: Some(Position::new(line + 3, 4)),
        }),
    }
}

fn test_files() -> IndexMap<String, TestFileReport> {
    let mut files = IndexMap::new();
    files.insert(
        "src/cart.unit.spec.ts".to_string(),
        TestFileReport {
            tests: vec![test("1", "adds items", 5), test("2", "computes total", 12)],
        },
    );
    files.insert(
        "src/price.unit.spec.ts".to_string(),
        TestFileReport {
            tests: vec![test("3", "formats price", 4), test("2b", "rounds", 9)],
        },
    );
    files
}

#[test]
fn empty_covered_by_matches_nothing() {
    let files = test_files();
    let found = matcher::find_covering_test(&files, &[]);
    assert!(found.test_file.is_none());
    assert!(found.test.is_none());
}

#[test]
fn unknown_ids_match_nothing() {
    let files = test_files();
    let found = matcher::find_covering_test(&files, &["99".to_string()]);
    assert_eq!(found, matcher::TestMatch::default());
}

#[test]
fn finds_test_by_id() {
    let files = test_files();
    let found = matcher::find_covering_test(&files, &["2".to_string()]);
    assert_eq!(found.test_file, Some("src/cart.unit.spec.ts"));
    assert_eq!(found.test.unwrap().name, "computes total");
}

#[test]
fn first_match_in_report_order_wins() {
    let files = test_files();
    // "3" lives in the second file, "2" in the first: the first file is scanned first.
    let found = matcher::find_covering_test(&files, &["3".to_string(), "2".to_string()]);
    assert_eq!(found.test.unwrap().id, "2");
    assert_eq!(found.test_file, Some("src/cart.unit.spec.ts"));
}

#[test]
fn first_test_within_a_file_wins() {
    let files = test_files();
    let found = matcher::find_covering_test(&files, &["2".to_string(), "1".to_string()]);
    assert_eq!(found.test.unwrap().id, "1");
}

#[test]
fn match_in_later_file() {
    let files = test_files();
    let found = matcher::find_covering_test(&files, &["2b".to_string()]);
    assert_eq!(found.test_file, Some("src/price.unit.spec.ts"));
    assert_eq!(found.test.unwrap().name, "rounds");
}

#[test]
fn no_test_files_matches_nothing() {
    let files = IndexMap::new();
    let found = matcher::find_covering_test(&files, &["1".to_string()]);
    assert!(found.test.is_none());
}

#[test]
fn describe_includes_name_and_line() {
    assert_eq!(test("1", "adds items", 5).describe(), "- adds items - (line 5)");
    let unplaced = TestRecord {
        id: "x".into(),
        name: "floating".into(),
        location: None,
    };
    assert_eq!(unplaced.describe(), "- floating");
}

// --- sibling_test_file ---

#[test]
fn sibling_shares_stem_and_directory() {
    let files = test_files();
    assert_eq!(
        matcher::sibling_test_file(&files, "src/cart.ts"),
        Some("src/cart.unit.spec.ts")
    );
}

#[test]
fn sibling_requires_same_directory() {
    let files = test_files();
    assert_eq!(matcher::sibling_test_file(&files, "lib/cart.ts"), None);
}

#[test]
fn sibling_requires_full_stem() {
    let files = test_files();
    // "car" is a prefix of "cart" but not followed by a dot.
    assert_eq!(matcher::sibling_test_file(&files, "src/car.ts"), None);
}
