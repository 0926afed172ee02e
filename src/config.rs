use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_REPORT: &str = "reports/mutation/stryker-incremental.json";
pub const DEFAULT_MUTATE_CONFIG: &str = "stryker.conf.json";
pub const DEFAULT_RUNNER: &str = "npx stryker";
pub const DEFAULT_TEST_SUFFIXES: &[&str] = &[".unit.spec.ts", ".unit.spec.js"];

#[derive(Debug, Clone)]
pub struct Settings {
    pub root: PathBuf,
    /// Report path, relative to `root` unless absolute.
    pub report_path: PathBuf,
    pub mutate_config: PathBuf,
    pub test_suffixes: Vec<String>,
    pub runner: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            root: PathBuf::from("."),
            report_path: PathBuf::from(DEFAULT_REPORT),
            mutate_config: PathBuf::from(DEFAULT_MUTATE_CONFIG),
            test_suffixes: DEFAULT_TEST_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            runner: DEFAULT_RUNNER.to_string(),
        }
    }
}

impl Settings {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Settings {
            root: root.into(),
            ..Settings::default()
        }
    }

    /// Absolute project root. Fails if it isn't an existing directory.
    pub fn resolve_root(&self) -> Result<PathBuf, ConfigError> {
        let root = if self.root.is_absolute() {
            self.root.clone()
        } else {
            std::env::current_dir()
                .map_err(|_| ConfigError::NoRoot(self.root.clone()))?
                .join(&self.root)
        };
        if !root.is_dir() {
            return Err(ConfigError::NoRoot(root));
        }
        Ok(root)
    }

    pub fn report_path(&self, root: &Path) -> PathBuf {
        root.join(&self.report_path)
    }

    pub fn mutate_config_path(&self, root: &Path) -> PathBuf {
        root.join(&self.mutate_config)
    }

    /// Report path, checked to exist.
    pub fn existing_report(&self, root: &Path) -> Result<PathBuf, ConfigError> {
        let path = self.report_path(root);
        if path.is_file() {
            Ok(path)
        } else {
            Err(ConfigError::ReportNotFound(path))
        }
    }

    pub fn is_test_file(&self, path: &str) -> bool {
        self.test_suffixes.iter().any(|s| path.ends_with(s.as_str()))
    }
}
