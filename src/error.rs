use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Problems with the environment that stop a pass before any processing.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("No project root open: {0} is not a directory")]
    NoRoot(PathBuf),

    #[error("Mutation report not found: {0}")]
    ReportNotFound(PathBuf),

    #[error("Mutation config not found: {0}")]
    MutateConfigNotFound(PathBuf),

    #[error("Refusing to mutate a test file: {0}")]
    TestFileTarget(String),
}

/// The report could not be used at all. Previously published diagnostics stay.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Report is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Report has no \"files\" property")]
    MissingFiles,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Report(#[from] ReportError),

    #[error("Watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("Failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}
