//! Fire-and-forget diagnostics

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// A diagnostic sink with no return contract
///
/// The scheduler and processes report through this trait and never wait on
/// it or observe failures from it.
pub trait DiagnosticsSink {
    fn log(&mut self, level: LogLevel, message: &str);
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn log(&mut self, _level: LogLevel, _message: &str) {}
}
