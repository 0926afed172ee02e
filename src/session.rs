//! Watch session: owns the report watcher and the diagnostics sink.
//!
//! File-system events are only forwarded by the watcher thread; every
//! processing pass runs on the thread that drives the session.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use notify::event::{EventKind, ModifyKind};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{ConfigError, Error, ReportError};
use crate::processor;
use crate::sink::{self, DiagnosticsSink};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Changed(PathBuf),
    Created(PathBuf),
    Deleted,
}

/// What a dispatched event did to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Published(usize),
    Cleared,
}

pub struct ReportWatcher {
    _watcher: RecommendedWatcher,
}

impl ReportWatcher {
    /// Watch the report's directory and forward events about the report file.
    pub fn start(report_path: &Path, tx: Sender<ReportEvent>) -> Result<Self, notify::Error> {
        let dir = report_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        let target = report_path.file_name().map(|n| n.to_os_string());

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!("watch error: {e}");
                    return;
                }
            };
            let Some(path) = event
                .paths
                .iter()
                .find(|p| p.file_name().map(|n| n.to_os_string()) == target)
            else {
                return;
            };
            if let Some(report_event) = classify(&event.kind, path) {
                let _ = tx.send(report_event);
            }
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::debug!("watching {}", dir.display());

        Ok(ReportWatcher { _watcher: watcher })
    }
}

fn classify(kind: &EventKind, path: &Path) -> Option<ReportEvent> {
    match kind {
        EventKind::Create(_) => Some(ReportEvent::Created(path.to_path_buf())),
        EventKind::Remove(_) => Some(ReportEvent::Deleted),
        EventKind::Modify(ModifyKind::Metadata(_)) => None,
        EventKind::Modify(_) if path.exists() => Some(ReportEvent::Changed(path.to_path_buf())),
        EventKind::Modify(_) => Some(ReportEvent::Deleted),
        _ => None,
    }
}

pub struct Session<S: DiagnosticsSink> {
    report_path: PathBuf,
    root: PathBuf,
    watch: Option<ReportWatcher>,
    sink: S,
    tx: Sender<ReportEvent>,
    rx: Receiver<ReportEvent>,
}

impl<S: DiagnosticsSink> Session<S> {
    pub fn new(report_path: &Path, root: &Path, sink: S) -> Self {
        let (tx, rx) = mpsc::channel();
        Session {
            report_path: report_path.to_path_buf(),
            root: root.to_path_buf(),
            watch: None,
            sink,
            tx,
            rx,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_watching(&self) -> bool {
        self.watch.is_some()
    }

    pub fn activate(&mut self) -> Result<(), Error> {
        if self.watch.is_some() {
            return Ok(());
        }
        if !self.report_path.exists() {
            return Err(ConfigError::ReportNotFound(self.report_path.clone()).into());
        }
        self.watch = Some(ReportWatcher::start(&self.report_path, self.tx.clone())?);
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.watch = None;
        // Events from the old watcher must not replay after the next activate.
        let stale = self.rx.try_iter().count();
        if stale > 0 {
            tracing::debug!("discarded {stale} queued report events");
        }
        self.sink.clear();
    }

    /// Flip the watcher on or off. Returns whether it is now on.
    pub fn toggle(&mut self) -> Result<bool, Error> {
        if self.is_watching() {
            self.deactivate();
        } else {
            self.activate()?;
        }
        Ok(self.is_watching())
    }

    /// Explicit re-processing request for the configured report.
    pub fn refresh(&mut self) -> Result<usize, ReportError> {
        let path = self.report_path.clone();
        self.run_pass(&path)
    }

    pub fn on_report_changed(&mut self, path: &Path) -> Result<usize, ReportError> {
        self.run_pass(path)
    }

    pub fn on_report_created(&mut self, path: &Path) -> Result<usize, ReportError> {
        self.run_pass(path)
    }

    pub fn on_report_deleted(&mut self) {
        self.sink.clear();
    }

    pub fn dispatch(&mut self, event: ReportEvent) -> Result<Outcome, ReportError> {
        match event {
            ReportEvent::Changed(path) => self.on_report_changed(&path).map(Outcome::Published),
            ReportEvent::Created(path) => self.on_report_created(&path).map(Outcome::Published),
            ReportEvent::Deleted => {
                self.on_report_deleted();
                Ok(Outcome::Cleared)
            }
        }
    }

    /// Wait up to `timeout` for the next report event.
    pub fn next_event(&self, timeout: Duration) -> Option<ReportEvent> {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => Some(event),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Drop events that are already queued, keeping only the newest.
    pub fn coalesce(&self, first: ReportEvent) -> ReportEvent {
        self.rx.try_iter().last().unwrap_or(first)
    }

    // A failed pass leaves whatever was published before in place.
    fn run_pass(&mut self, path: &Path) -> Result<usize, ReportError> {
        let map = processor::process_report(path, &self.root)?;
        let count = processor::diagnostic_count(&map);
        sink::publish(&mut self.sink, map);
        Ok(count)
    }
}
