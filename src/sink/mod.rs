//! Metric Sinks
//!
//! Every emission ends in a [`MetricSink`]:
//! - [`StatsdSink`]: real DogStatsD client over UDP
//! - [`NullSink`]: discards everything, backs the disabled mode
//! - [`RecordingSink`]: in-memory recording for tests and simulations
//!
//! Sinks report failures as [`SinkError`]; swallowing and logging them is the
//! job of [`Metrics`](crate::Metrics), not of the sink.

mod null;
mod recording;
mod statsd;

use std::sync::Arc;
use std::time::Duration;

use crate::error::SinkError;

pub use null::NullSink;
pub use recording::{MetricKind, RecordedMetric, RecordingSink};
pub use statsd::StatsdSink;

pub type SinkResult = Result<(), SinkError>;

/// Capability shared by every metrics destination.
///
/// `rate` is the sample rate in `(0.0, 1.0]`. Sinks that talk to the network
/// apply it; recording sinks store it.
pub trait MetricSink: Send + Sync + 'static {
    fn count(&self, name: &str, value: i64, tags: &[&str], rate: f64) -> SinkResult;

    fn incr(&self, name: &str, tags: &[&str], rate: f64) -> SinkResult;

    fn decr(&self, name: &str, tags: &[&str], rate: f64) -> SinkResult;

    fn gauge(&self, name: &str, value: f64, tags: &[&str], rate: f64) -> SinkResult;

    fn histogram(&self, name: &str, value: f64, tags: &[&str], rate: f64) -> SinkResult;

    fn distribution(&self, name: &str, value: f64, tags: &[&str], rate: f64) -> SinkResult;

    /// Record a duration as a statsd `ms` timer
    fn timing(&self, name: &str, duration: Duration, tags: &[&str], rate: f64) -> SinkResult;

    /// Block until everything buffered has been sent
    fn flush(&self) -> SinkResult {
        Ok(())
    }
}

/// Arc wrapper for trait object usage
pub type SharedSink = Arc<dyn MetricSink>;

/// Decide whether a sample at `rate` should be sent.
///
/// Rates at or above 1.0 always pass; zero, negative and NaN never do.
#[inline]
pub(crate) fn should_sample(rate: f64) -> bool {
    if rate >= 1.0 {
        return true;
    }
    rand::random::<f64>() < rate
}
