use std::path::Path;

use indexmap::IndexMap;

use crate::report::{TestFileReport, TestRecord};

/// The covering test picked for a mutant, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TestMatch<'a> {
    pub test_file: Option<&'a str>,
    pub test: Option<&'a TestRecord>,
}

/// First test, in report order, whose id is in `covered_by`.
///
/// Scanning stops at the first hit even when later tests also cover the
/// mutant. An empty `covered_by` never matches.
pub fn find_covering_test<'a>(
    test_files: &'a IndexMap<String, TestFileReport>,
    covered_by: &[String],
) -> TestMatch<'a> {
    if covered_by.is_empty() {
        return TestMatch::default();
    }
    for (file_name, file) in test_files {
        if let Some(test) = file.tests.iter().find(|t| covered_by.contains(&t.id)) {
            return TestMatch {
                test_file: Some(file_name.as_str()),
                test: Some(test),
            };
        }
    }
    TestMatch::default()
}

/// A test file that sits next to `source_file` and shares its stem,
/// e.g. `src/cart.unit.spec.ts` for `src/cart.ts`.
pub fn sibling_test_file<'a>(
    test_files: &'a IndexMap<String, TestFileReport>,
    source_file: &str,
) -> Option<&'a str> {
    let source = Path::new(source_file);
    let stem = source.file_stem()?.to_str()?;
    let dir = source.parent().unwrap_or(Path::new(""));
    test_files.keys().map(String::as_str).find(|name| {
        let candidate = Path::new(name);
        candidate.parent().unwrap_or(Path::new("")) == dir
            && candidate
                .file_name()
                .and_then(|n| n.to_str())
                .and_then(|n| n.strip_prefix(stem))
                .is_some_and(|rest| rest.starts_with('.') && *name != source_file)
    })
}
