//! Recording sink for tests and simulations
//!
//! Records every emission in memory so callers can verify exactly what the
//! facade sent, including the sample rate. Can be switched into a failing mode
//! to exercise the error-logging path.

use parking_lot::Mutex;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use super::{MetricSink, SinkResult};
use crate::error::SinkError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Count,
    Increment,
    Decrement,
    Gauge,
    Histogram,
    Distribution,
    Timing,
}

/// One recorded emission
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedMetric {
    pub name: String,
    pub value: f64,
    pub tags: Vec<String>,
    pub rate: f64,
    pub kind: MetricKind,
}

#[derive(Default)]
pub struct RecordingSink {
    recorded: Mutex<Vec<RecordedMetric>>,
    flush_count: AtomicU64,
    failing: AtomicBool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose every call fails with a transport error
    pub fn failing() -> Self {
        let sink = Self::default();
        sink.set_failing(true);
        sink
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Get all recorded metrics
    pub fn recorded(&self) -> Vec<RecordedMetric> {
        self.recorded.lock().clone()
    }

    /// Get metrics by name
    pub fn by_name(&self, name: &str) -> Vec<RecordedMetric> {
        self.recorded
            .lock()
            .iter()
            .filter(|m| m.name == name)
            .cloned()
            .collect()
    }

    pub fn contains(&self, name: &str, kind: MetricKind) -> bool {
        self.recorded
            .lock()
            .iter()
            .any(|m| m.name == name && m.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.recorded.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.recorded.lock().is_empty()
    }

    pub fn flush_count(&self) -> u64 {
        self.flush_count.load(Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.recorded.lock().clear();
        self.flush_count.store(0, Ordering::SeqCst);
    }

    fn record(&self, name: &str, value: f64, tags: &[&str], rate: f64, kind: MetricKind) -> SinkResult {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SinkError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "recording sink set to fail",
            )));
        }
        self.recorded.lock().push(RecordedMetric {
            name: name.to_string(),
            value,
            tags: tags.iter().map(|s| s.to_string()).collect(),
            rate,
            kind,
        });
        Ok(())
    }
}

impl MetricSink for RecordingSink {
    fn count(&self, name: &str, value: i64, tags: &[&str], rate: f64) -> SinkResult {
        self.record(name, value as f64, tags, rate, MetricKind::Count)
    }

    fn incr(&self, name: &str, tags: &[&str], rate: f64) -> SinkResult {
        self.record(name, 1.0, tags, rate, MetricKind::Increment)
    }

    fn decr(&self, name: &str, tags: &[&str], rate: f64) -> SinkResult {
        self.record(name, -1.0, tags, rate, MetricKind::Decrement)
    }

    fn gauge(&self, name: &str, value: f64, tags: &[&str], rate: f64) -> SinkResult {
        self.record(name, value, tags, rate, MetricKind::Gauge)
    }

    fn histogram(&self, name: &str, value: f64, tags: &[&str], rate: f64) -> SinkResult {
        self.record(name, value, tags, rate, MetricKind::Histogram)
    }

    fn distribution(&self, name: &str, value: f64, tags: &[&str], rate: f64) -> SinkResult {
        self.record(name, value, tags, rate, MetricKind::Distribution)
    }

    fn timing(&self, name: &str, duration: Duration, tags: &[&str], rate: f64) -> SinkResult {
        self.record(name, duration.as_millis() as f64, tags, rate, MetricKind::Timing)
    }

    fn flush(&self) -> SinkResult {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SinkError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "recording sink set to fail",
            )));
        }
        self.flush_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
