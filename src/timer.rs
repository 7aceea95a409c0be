//! Execution-time helpers
//!
//! `measure_exec_time` reports the time since a captured `Instant`.
//! [`ExecTimer`] wraps the same call in a scope guard so the measurement is
//! emitted on every exit path: normal return, `?` early return, or unwinding.
//!
//! ```rust,ignore
//! fn handle(job: &Job) -> Result<(), Error> {
//!     let _timer = statsd_shim::simple_timer("jobs.handle");
//!     job.validate()?;
//!     job.run()
//! }
//! ```

use std::time::{Duration, Instant};

use crate::metrics::Metrics;
use crate::registry;

/// See [`Metrics::measure_exec_time`]; reports to the process-wide client
pub fn measure_exec_time(name: &str, tags: &[&str], rate: f64, start: Instant) -> Duration {
    registry::load().measure_exec_time(name, tags, rate, start)
}

/// [`measure_exec_time`] with no tags at full sample rate
pub fn simple_measure_exec_time(name: &str, start: Instant) -> Duration {
    measure_exec_time(name, &[], 1.0, start)
}

/// Start a scope timer reporting to the process-wide client
pub fn start_timer(name: &str, tags: &[&str], rate: f64) -> ExecTimer {
    ExecTimer::new(None, name, tags, rate)
}

/// [`start_timer`] with no tags at full sample rate
pub fn simple_timer(name: &str) -> ExecTimer {
    start_timer(name, &[], 1.0)
}

/// RAII timer that records duration when dropped.
///
/// A timer from [`start_timer`] resolves the process-wide client when it
/// finishes, so it follows a `configure`/`disable` made while it ran. One from
/// [`Metrics::timer`] stays bound to that client.
#[must_use = "the measurement is emitted when the timer is dropped"]
pub struct ExecTimer {
    metrics: Option<Metrics>,
    name: String,
    tags: Vec<String>,
    rate: f64,
    start: Instant,
    finished: bool,
}

impl ExecTimer {
    pub(crate) fn bound(metrics: Metrics, name: &str, tags: &[&str], rate: f64) -> Self {
        Self::new(Some(metrics), name, tags, rate)
    }

    fn new(metrics: Option<Metrics>, name: &str, tags: &[&str], rate: f64) -> Self {
        ExecTimer {
            metrics,
            name: name.to_string(),
            tags: tags.iter().map(|s| s.to_string()).collect(),
            rate,
            start: Instant::now(),
            finished: false,
        }
    }

    /// Add a tag to the timer
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    /// Time since the timer started; does not emit
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Emit now instead of at drop and return the elapsed duration
    pub fn stop(mut self) -> Duration {
        self.finish()
    }

    fn finish(&mut self) -> Duration {
        self.finished = true;
        let tags: Vec<&str> = self.tags.iter().map(|s| s.as_str()).collect();
        match &self.metrics {
            Some(metrics) => metrics.measure_exec_time(&self.name, &tags, self.rate, self.start),
            None => measure_exec_time(&self.name, &tags, self.rate, self.start),
        }
    }
}

impl Drop for ExecTimer {
    fn drop(&mut self) {
        if !self.finished {
            self.finish();
        }
    }
}
