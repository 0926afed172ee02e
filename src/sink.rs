use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::output;
use crate::processor::{Diagnostic, DiagnosticsMap};

/// Where published diagnostics end up.
pub trait DiagnosticsSink {
    fn clear(&mut self);
    fn set(&mut self, path: &Path, diagnostics: Vec<Diagnostic>);
}

/// Replace everything in `sink` with `map`. Never merges with what was there.
pub fn publish<S: DiagnosticsSink + ?Sized>(sink: &mut S, map: DiagnosticsMap) {
    sink.clear();
    for (path, diagnostics) in map {
        sink.set(&path, diagnostics);
    }
}

#[derive(Debug, Default)]
pub struct MemorySink {
    entries: IndexMap<PathBuf, Vec<Diagnostic>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<&[Diagnostic]> {
        self.entries.get(path).map(Vec::as_slice)
    }

    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.entries.keys().map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl DiagnosticsSink for MemorySink {
    fn clear(&mut self) {
        self.entries.clear();
    }

    fn set(&mut self, path: &Path, diagnostics: Vec<Diagnostic>) {
        self.entries.insert(path.to_path_buf(), diagnostics);
    }
}

/// Prints each published batch to stdout.
pub struct ConsoleSink {
    root: PathBuf,
    json: bool,
    published: usize,
}

impl ConsoleSink {
    pub fn new(root: &Path, json: bool) -> Self {
        ConsoleSink {
            root: root.to_path_buf(),
            json,
            published: 0,
        }
    }

    /// Diagnostics published since the last clear.
    pub fn published(&self) -> usize {
        self.published
    }
}

impl DiagnosticsSink for ConsoleSink {
    fn clear(&mut self) {
        self.published = 0;
        if !self.json {
            output::print_cleared();
        }
    }

    fn set(&mut self, path: &Path, diagnostics: Vec<Diagnostic>) {
        self.published += diagnostics.len();
        if self.json {
            output::print_file_json(path, &diagnostics);
        } else {
            output::print_file_diagnostics(path, &self.root, &diagnostics);
        }
    }
}
