//! Process-wide DogStatsD metrics facade
//!
//! Configure a statsd client once, then emit counters, gauges, histograms and
//! distributions from anywhere in the process. The facade starts out
//! disabled, so emission is always safe, and it never surfaces an emission
//! error to the caller.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use std::time::Instant;
//! use statsd_shim::{StatsdConfig, TracingLogger};
//!
//! let config = StatsdConfig::from_env()?;
//! statsd_shim::apply(&config, Arc::new(TracingLogger))?;
//!
//! statsd_shim::simple_incr("jobs.done", &["queue:mail"]);
//!
//! let start = Instant::now();
//! run_job()?;
//! statsd_shim::simple_measure_exec_time("jobs.duration", start);
//!
//! statsd_shim::flush();
//! ```

pub mod address;
pub mod config;
pub mod error;
pub mod facade;
pub mod logger;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod sink;
pub mod timer;

pub use address::{format_address, is_ipv6, STANDARD_PORT};
pub use config::StatsdConfig;
pub use error::{ConfigError, SinkError};
pub use facade::{
    apply, configure, configure_with, count, decr, disable, distribution, flush, gauge, histogram,
    incr, install, mode, simple_incr, timing,
};
pub use logger::{ErrorLogger, RecordingLogger, TracingLogger};
pub use logging::init_logging;
pub use metrics::{Metrics, Mode};
pub use registry::current;
pub use sink::{MetricKind, MetricSink, NullSink, RecordedMetric, RecordingSink, SharedSink, StatsdSink};
pub use timer::{
    measure_exec_time, simple_measure_exec_time, simple_timer, start_timer, ExecTimer,
};
