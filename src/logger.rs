//! Emission error logger
//!
//! The facade reports failed emissions through exactly one capability: a
//! formatted print. Nothing else is ever logged through it.

use parking_lot::Mutex;
use std::fmt;

/// Sink for emission-failure messages
pub trait ErrorLogger: Send + Sync + 'static {
    fn log(&self, args: fmt::Arguments<'_>);
}

/// Default logger: forwards to `tracing` at WARN
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl ErrorLogger for TracingLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        tracing::warn!("{}", args);
    }
}

/// Logger that keeps every message in memory, for assertions
#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<String>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl ErrorLogger for RecordingLogger {
    fn log(&self, args: fmt::Arguments<'_>) {
        self.lines.lock().push(args.to_string());
    }
}
