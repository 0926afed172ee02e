//! Turns surviving mutants into editor diagnostics.
//!
//! A pass reads the report, walks every file in report order and builds one
//! [`Diagnostic`] per surviving mutant. Files that vanished from disk and
//! mutants without a location are skipped quietly.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::ReportError;
use crate::extract;
use crate::matcher;
use crate::prompt::{self, PromptInput};
use crate::report::{FileReport, Mutant, MutationReport, Position, TestFileReport};

pub const DIAGNOSTIC_SOURCE: &str = "Stryker";

/// Diagnostics for one pass, keyed by absolute file path in report order.
pub type DiagnosticsMap = IndexMap<PathBuf, Vec<Diagnostic>>;

/// 0-based line and column, as editors address text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditorPosition {
    pub line: usize,
    pub character: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub start: EditorPosition,
    pub end: EditorPosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub range: Range,
    pub message: String,
    pub severity: Severity,
    pub source: &'static str,
    pub mutator: String,
}

impl From<Position> for EditorPosition {
    fn from(p: Position) -> Self {
        EditorPosition {
            line: p.line.saturating_sub(1),
            character: p.column,
        }
    }
}

impl Range {
    pub fn from_report(start: Position, end: Position) -> Self {
        Range {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Read the report at `report_path` and run one pass over it.
pub fn process_report(report_path: &Path, root: &Path) -> Result<DiagnosticsMap, ReportError> {
    let report = MutationReport::load(report_path)?;
    Ok(process(&report.files, &report.test_files, root))
}

pub fn process(
    files: &IndexMap<String, FileReport>,
    test_files: &IndexMap<String, TestFileReport>,
    root: &Path,
) -> DiagnosticsMap {
    let mut map = DiagnosticsMap::new();

    for (file_name, file) in files {
        let abs_path = root.join(file_name);
        if !abs_path.exists() {
            tracing::debug!("skipping {file_name}: not found at {}", abs_path.display());
            continue;
        }

        let diagnostics: Vec<Diagnostic> = file
            .mutants
            .iter()
            .filter(|m| m.is_survivor())
            .filter_map(|m| build_diagnostic(m, file_name, &abs_path, file, test_files))
            .collect();

        if !diagnostics.is_empty() {
            map.insert(abs_path, diagnostics);
        }
    }

    map
}

fn build_diagnostic(
    mutant: &Mutant,
    file_name: &str,
    abs_path: &Path,
    file: &FileReport,
    test_files: &IndexMap<String, TestFileReport>,
) -> Option<Diagnostic> {
    let Some((start, end)) = mutant.span() else {
        tracing::debug!(
            "skipping {} mutant in {file_name}: no location",
            mutant.mutator_name
        );
        return None;
    };

    let original = extract::original_code(abs_path, file.source.as_deref(), start, end);

    let found = matcher::find_covering_test(test_files, mutant.covered_by());
    let test_info = found.test.map(|t| t.describe());
    let test_file_name = found
        .test_file
        .or_else(|| matcher::sibling_test_file(test_files, file_name));

    let message = prompt::compose(&PromptInput {
        mutator_name: &mutant.mutator_name,
        original_code: &original,
        replacement_code: &mutant.replacement,
        file_name,
        line: start.line,
        test_info: test_info.as_deref(),
        test_file_name,
    });

    Some(Diagnostic {
        range: Range::from_report(start, end),
        message,
        severity: Severity::Warning,
        source: DIAGNOSTIC_SOURCE,
        mutator: mutant.mutator_name.clone(),
    })
}

pub fn diagnostic_count(map: &DiagnosticsMap) -> usize {
    map.values().map(Vec::len).sum()
}
