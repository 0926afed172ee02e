//! Typed view of a Stryker mutation-testing report.
//!
//! Only the parts the diagnostics pass needs are modelled. Individual
//! file, mutant or test entries that do not fit their record shape are
//! dropped rather than failing the whole report.

use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ReportError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawReport {
    #[serde(default, deserialize_with = "lenient_map")]
    files: Option<IndexMap<String, FileReport>>,
    #[serde(default, deserialize_with = "lenient_map")]
    test_files: Option<IndexMap<String, TestFileReport>>,
}

#[derive(Debug, Clone, Default)]
pub struct MutationReport {
    pub files: IndexMap<String, FileReport>,
    pub test_files: IndexMap<String, TestFileReport>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub mutants: Vec<Mutant>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mutant {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mutator_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub replacement: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub covered_by: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub start: Option<Position>,
    #[serde(default)]
    pub end: Option<Position>,
}

/// A point in a source file: 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestFileReport {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub tests: Vec<TestRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutantStatus {
    Killed,
    Survived,
    NoCoverage,
    Timeout,
    CompileError,
    RuntimeError,
    Ignored,
    Pending,
    Unknown(String),
}

impl MutantStatus {
    pub fn parse(status: &str) -> Self {
        match status.to_ascii_lowercase().as_str() {
            "killed" => MutantStatus::Killed,
            "survived" => MutantStatus::Survived,
            "nocoverage" => MutantStatus::NoCoverage,
            "timeout" => MutantStatus::Timeout,
            "compileerror" => MutantStatus::CompileError,
            "runtimeerror" => MutantStatus::RuntimeError,
            "ignored" => MutantStatus::Ignored,
            "pending" => MutantStatus::Pending,
            _ => MutantStatus::Unknown(status.to_string()),
        }
    }
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl Location {
    pub fn span(&self) -> Option<(Position, Position)> {
        Some((self.start?, self.end?))
    }
}

impl Mutant {
    pub fn status(&self) -> MutantStatus {
        MutantStatus::parse(&self.status)
    }

    pub fn is_survivor(&self) -> bool {
        self.status() == MutantStatus::Survived
    }

    /// Start and end of the mutated text, if the report placed it.
    pub fn span(&self) -> Option<(Position, Position)> {
        self.location.as_ref()?.span()
    }

    pub fn covered_by(&self) -> &[String] {
        self.covered_by.as_deref().unwrap_or(&[])
    }
}

impl TestRecord {
    pub fn start_line(&self) -> Option<usize> {
        self.location.as_ref()?.start.map(|p| p.line)
    }

    /// One-line summary used when pointing at this test in a prompt.
    pub fn describe(&self) -> String {
        match self.start_line() {
            Some(line) => format!("- {} - (line {})", self.name, line),
            None => format!("- {}", self.name),
        }
    }
}

impl MutationReport {
    pub fn parse(data: &str) -> Result<Self, ReportError> {
        let raw: RawReport = serde_json::from_str(data)?;
        let files = raw.files.ok_or(ReportError::MissingFiles)?;
        Ok(MutationReport {
            files,
            test_files: raw.test_files.unwrap_or_default(),
        })
    }

    /// Read and parse the report from disk. Nothing is cached between calls.
    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let data = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data)
    }

    pub fn survivor_count(&self) -> usize {
        self.files
            .values()
            .flat_map(|f| f.mutants.iter())
            .filter(|m| m.is_survivor())
            .count()
    }
}

fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::debug!("dropping malformed report entry: {e}");
                None
            }
        })
        .collect())
}

fn lenient_map<'de, D, T>(deserializer: D) -> Result<Option<IndexMap<String, T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw: Option<IndexMap<String, serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|entries| {
        entries
            .into_iter()
            .filter_map(|(name, value)| match serde_json::from_value(value) {
                Ok(item) => Some((name, item)),
                Err(e) => {
                    tracing::debug!("dropping malformed report entry {name}: {e}");
                    None
                }
            })
            .collect()
    }))
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}
