//! Progress reporting hooks.
//!
//! The pipeline announces phases and passed checks through [`Progress`] so
//! callers decide how (or whether) to show them. The CLI renders them as
//! `-> ` and `   ... ` lines.

use std::path::Path;

/// Receiver for pipeline progress events. Every method defaults to a no-op.
pub trait Progress {
    /// Validation of the package at `root` is starting.
    fn begin(&mut self, _root: &Path) {}

    /// A validation phase is starting.
    fn phase(&mut self, _message: &str) {}

    /// A check passed.
    fn passed(&mut self, _message: &str) {}
}

/// Discards all progress events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {}

/// Records progress events in order, mostly for tests and embedding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordedProgress {
    pub events: Vec<ProgressEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Begin(String),
    Phase(String),
    Passed(String),
}

impl RecordedProgress {
    /// Messages of all [`ProgressEvent::Passed`] events.
    pub fn passed_checks(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ProgressEvent::Passed(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Progress for RecordedProgress {
    fn begin(&mut self, root: &Path) {
        self.events
            .push(ProgressEvent::Begin(root.display().to_string()));
    }

    fn phase(&mut self, message: &str) {
        self.events.push(ProgressEvent::Phase(message.to_string()));
    }

    fn passed(&mut self, message: &str) {
        self.events.push(ProgressEvent::Passed(message.to_string()));
    }
}
