pub mod config;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod output;
pub mod processor;
pub mod prompt;
pub mod report;
pub mod runner;
pub mod session;
pub mod sink;

pub use error::{ConfigError, Error, ReportError};
pub use processor::{Diagnostic, DiagnosticsMap, process, process_report};
