//! Logger that keeps every entry in memory for assertions.

use serde_json::Value;
use std::sync::{Mutex, PoisonError};

use crate::domain::ports::Logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Log,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
    pub context: Option<Value>,
}

#[derive(Debug, Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<LogEntry>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn errors(&self) -> Vec<LogEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.kind == LogKind::Error)
            .collect()
    }

    /// True if any informational entry has exactly this message.
    pub fn contains(&self, message: &str) -> bool {
        self.has(LogKind::Log, message)
    }

    /// True if any error entry has exactly this message.
    pub fn contains_error(&self, message: &str) -> bool {
        self.has(LogKind::Error, message)
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }

    fn has(&self, kind: LogKind, message: &str) -> bool {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .any(|entry| entry.kind == kind && entry.message == message)
    }

    fn push(&self, kind: LogKind, message: &str, context: Option<Value>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(LogEntry {
                kind,
                message: message.to_string(),
                context,
            });
    }
}

impl Logger for RecordingLogger {
    fn log(&self, message: &str, context: Option<Value>) {
        self.push(LogKind::Log, message, context);
    }

    fn error(&self, message: &str, error: Option<Value>) {
        self.push(LogKind::Error, message, error);
    }
}
