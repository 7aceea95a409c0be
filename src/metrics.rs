//! Metrics client with graceful degradation
//!
//! [`Metrics`] pairs a sink with an error logger. Every emission is
//! best-effort: sink failures are formatted into the logger and dropped, so a
//! metrics problem can never fail the caller's own work.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::StatsdConfig;
use crate::error::ConfigError;
use crate::logger::ErrorLogger;
use crate::sink::{NullSink, SharedSink, SinkResult, StatsdSink};
use crate::timer::ExecTimer;

/// Operating mode of a [`Metrics`] client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Backed by [`NullSink`]; nothing leaves the process
    Disabled,
    /// Backed by a real or caller-supplied sink
    Configured,
}

#[derive(Clone)]
pub struct Metrics {
    sink: SharedSink,
    logger: Arc<dyn ErrorLogger>,
    mode: Mode,
}

impl Metrics {
    /// Create a DogStatsD-backed client from configuration
    pub fn connect(config: &StatsdConfig, logger: Arc<dyn ErrorLogger>) -> Result<Self, ConfigError> {
        let sink = StatsdSink::connect(config)?;
        tracing::info!(
            addr = %sink.addr(),
            namespace = %config.namespace,
            tags = ?sink.global_tags(),
            "DogStatsD client configured"
        );
        Ok(Self::with_sink(Arc::new(sink), logger))
    }

    /// Client that discards everything
    pub fn disabled(logger: Arc<dyn ErrorLogger>) -> Self {
        Metrics {
            sink: Arc::new(NullSink),
            logger,
            mode: Mode::Disabled,
        }
    }

    /// Client over an arbitrary sink
    pub fn with_sink(sink: SharedSink, logger: Arc<dyn ErrorLogger>) -> Self {
        Metrics {
            sink,
            logger,
            mode: Mode::Configured,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn logger(&self) -> &Arc<dyn ErrorLogger> {
        &self.logger
    }

    #[inline]
    pub fn count(&self, name: &str, value: i64, tags: &[&str], rate: f64) {
        self.report(self.sink.count(name, value, tags, rate));
    }

    #[inline]
    pub fn incr(&self, name: &str, tags: &[&str], rate: f64) {
        self.report(self.sink.incr(name, tags, rate));
    }

    #[inline]
    pub fn decr(&self, name: &str, tags: &[&str], rate: f64) {
        self.report(self.sink.decr(name, tags, rate));
    }

    #[inline]
    pub fn gauge(&self, name: &str, value: f64, tags: &[&str], rate: f64) {
        self.report(self.sink.gauge(name, value, tags, rate));
    }

    #[inline]
    pub fn histogram(&self, name: &str, value: f64, tags: &[&str], rate: f64) {
        self.report(self.sink.histogram(name, value, tags, rate));
    }

    #[inline]
    pub fn distribution(&self, name: &str, value: f64, tags: &[&str], rate: f64) {
        self.report(self.sink.distribution(name, value, tags, rate));
    }

    #[inline]
    pub fn timing(&self, name: &str, duration: Duration, tags: &[&str], rate: f64) {
        self.report(self.sink.timing(name, duration, tags, rate));
    }

    /// Increment by one at full sample rate
    #[inline]
    pub fn simple_incr(&self, name: &str, tags: &[&str]) {
        self.incr(name, tags, 1.0);
    }

    /// Emit the time since `start` as a histogram of whole milliseconds.
    ///
    /// Returns the full-resolution elapsed duration.
    pub fn measure_exec_time(&self, name: &str, tags: &[&str], rate: f64, start: Instant) -> Duration {
        let elapsed = start.elapsed();
        self.histogram(name, elapsed.as_millis() as f64, tags, rate);
        elapsed
    }

    pub fn simple_measure_exec_time(&self, name: &str, start: Instant) -> Duration {
        self.measure_exec_time(name, &[], 1.0, start)
    }

    /// Start a timer that reports to this client when dropped
    pub fn timer(&self, name: &str, tags: &[&str], rate: f64) -> ExecTimer {
        ExecTimer::bound(self.clone(), name, tags, rate)
    }

    /// Block until the sink has sent everything it buffered
    pub fn flush(&self) {
        if let Err(e) = self.sink.flush() {
            self.logger.log(format_args!("error flushing metrics: {}", e));
        }
    }

    #[inline]
    fn report(&self, result: SinkResult) {
        if let Err(e) = result {
            self.logger.log(format_args!("error reporting metric: {}", e));
        }
    }
}

impl std::fmt::Debug for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Metrics").field("mode", &self.mode).finish_non_exhaustive()
    }
}
