//! A recording log sink for asserting on logger-mixin output.

use admix_logger::{LogSink, Severity};
use std::sync::Mutex;

/// Collects every emitted message with its severity.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(Severity, String)>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    pub fn entries(&self) -> Vec<(Severity, String)> {
        self.entries.lock().unwrap().clone()
    }

    fn push(&self, severity: Severity, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((severity, message.to_string()));
    }
}

impl LogSink for RecordingSink {
    fn log(&self, message: &str) {
        self.push(Severity::Log, message);
    }

    fn warn(&self, message: &str) {
        self.push(Severity::Warn, message);
    }

    fn error(&self, message: &str) {
        self.push(Severity::Error, message);
    }

    fn info(&self, message: &str) {
        self.push(Severity::Info, message);
    }
}
