// Copyright (c) 2025 - Cowboy AI, Inc.
//! Job log
//!
//! Operator-facing record of a provisioning run. Every entry is mirrored to
//! `tracing` as it is appended, so the log doubles as the run's audit trail.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error, info, warn};

/// Severity of a job log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    /// A record was created
    Success,
    Warning,
    /// The run was aborted
    Failure,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Success => "success",
            LogLevel::Warning => "warning",
            LogLevel::Failure => "failure",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct JobLog {
    entries: Vec<LogEntry>,
}

impl JobLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Debug => debug!("{}", message),
            LogLevel::Info | LogLevel::Success => info!("{}", message),
            LogLevel::Warning => warn!("{}", message),
            LogLevel::Failure => error!("{}", message),
        }
        self.entries.push(LogEntry { level, message });
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn failure(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Failure, message);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Messages at one level, in order
    pub fn messages(&self, level: LogLevel) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.level == level)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn has_failures(&self) -> bool {
        self.entries.iter().any(|e| e.level == LogLevel::Failure)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
