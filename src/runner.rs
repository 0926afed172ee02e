use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::config::Settings;
use crate::error::{ConfigError, Error};

/// A validated request to re-run mutation testing for a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutateCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
}

/// Check that `rel_path` may be mutated on its own and build the command.
///
/// Test files are refused, and the project must carry a mutation config.
pub fn prepare(settings: &Settings, root: &Path, rel_path: &str) -> Result<MutateCommand, ConfigError> {
    let config_path = settings.mutate_config_path(root);
    if !config_path.is_file() {
        return Err(ConfigError::MutateConfigNotFound(config_path));
    }
    if settings.is_test_file(rel_path) {
        return Err(ConfigError::TestFileTarget(rel_path.to_string()));
    }

    let (program, mut args) = parse_runner(&settings.runner);
    args.extend(["run".to_string(), "--mutate".to_string(), rel_path.to_string()]);

    Ok(MutateCommand {
        program,
        args,
        working_dir: root.to_path_buf(),
    })
}

pub fn parse_runner(cmd: &str) -> (String, Vec<String>) {
    let mut parts = cmd.split_whitespace().map(str::to_string);
    let program = parts.next().unwrap_or_default();
    (program, parts.collect())
}

/// Path of `file` relative to `root`, in the form the runner expects.
///
/// A relative `file` is taken relative to `cwd`. Paths outside the root are
/// passed through as given.
pub fn relative_to_root(root: &Path, cwd: &Path, file: &Path) -> String {
    let abs = if file.is_absolute() {
        file.to_path_buf()
    } else {
        cwd.join(file)
    };
    if let Ok(rel) = abs.strip_prefix(root) {
        return slashed(rel);
    }
    // Symlinked temp dirs and `..` segments only line up once canonicalized.
    if let (Ok(abs), Ok(root)) = (abs.canonicalize(), root.canonicalize()) {
        if let Ok(rel) = abs.strip_prefix(&root) {
            return slashed(rel);
        }
    }
    slashed(file)
}

fn slashed(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

impl MutateCommand {
    /// Run in the project root with the terminal attached.
    pub fn spawn(&self) -> Result<ExitStatus, Error> {
        tracing::info!("running {self}");
        Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.working_dir)
            .status()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })
    }
}

impl fmt::Display for MutateCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        let n = self.args.len();
        for (i, arg) in self.args.iter().enumerate() {
            // The mutate target is the last argument; quote it.
            if i + 1 == n && n >= 3 && self.args[n - 2] == "--mutate" {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}
