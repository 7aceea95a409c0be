//! Process-wide emission functions
//!
//! Configure once at startup, then emit from anywhere. Before any
//! configuration the process-wide client is disabled, so every call here is
//! always safe. Emission never returns an error: failures go to the logger
//! supplied at configuration time.
//!
//! `rate` is a sample rate in `(0.0, 1.0]`. Below 1.0 the statsd sink keeps a
//! sample with probability `rate` and appends `|@rate` to the line, so the
//! agent scales counts back up. Sinks that do not write the rate (recording
//! or custom sinks) see the unscaled, already-sampled stream.

use std::sync::Arc;
use std::time::Duration;

use crate::config::StatsdConfig;
use crate::error::ConfigError;
use crate::logger::ErrorLogger;
use crate::metrics::{Metrics, Mode};
use crate::registry;
use crate::sink::SharedSink;

/// Point the process-wide client at a DogStatsD agent on `host:8125`.
///
/// Empty `namespace`, `env` or `component` are omitted. On error the active
/// client and logger are left as they were.
pub fn configure(
    host: &str,
    namespace: &str,
    env: &str,
    component: &str,
    logger: Arc<dyn ErrorLogger>,
) -> Result<(), ConfigError> {
    configure_with(&StatsdConfig::new(host, namespace, env, component), logger)
}

/// [`configure`] from a loaded [`StatsdConfig`]; `enabled` is ignored
pub fn configure_with(config: &StatsdConfig, logger: Arc<dyn ErrorLogger>) -> Result<(), ConfigError> {
    let metrics = Metrics::connect(config, logger)?;
    registry::replace(metrics);
    Ok(())
}

/// Switch the process-wide client to the null sink, keeping the current logger
pub fn disable() -> Result<(), ConfigError> {
    let logger = registry::load().logger().clone();
    let previous = registry::replace(Metrics::disabled(logger));
    if previous.mode() != Mode::Disabled {
        tracing::info!("statsd metrics disabled");
    }
    Ok(())
}

/// Configure or disable according to `config.enabled`
pub fn apply(config: &StatsdConfig, logger: Arc<dyn ErrorLogger>) -> Result<(), ConfigError> {
    if config.enabled {
        configure_with(config, logger)
    } else {
        let previous = registry::replace(Metrics::disabled(logger));
        if previous.mode() != Mode::Disabled {
            tracing::info!("statsd metrics disabled by configuration");
        }
        Ok(())
    }
}

/// Route the process-wide client to a caller-supplied sink
pub fn install(sink: SharedSink, logger: Arc<dyn ErrorLogger>) {
    registry::replace(Metrics::with_sink(sink, logger));
}

/// Whether the process-wide client is disabled or configured
pub fn mode() -> Mode {
    registry::load().mode()
}

/// Add `value` to counter `name`, sampled at `rate`
#[inline]
pub fn count(name: &str, value: i64, tags: &[&str], rate: f64) {
    registry::load().count(name, value, tags, rate);
}

/// Add one to counter `name`, sampled at `rate`
#[inline]
pub fn incr(name: &str, tags: &[&str], rate: f64) {
    registry::load().incr(name, tags, rate);
}

/// Subtract one from counter `name`, sampled at `rate`
#[inline]
pub fn decr(name: &str, tags: &[&str], rate: f64) {
    registry::load().decr(name, tags, rate);
}

/// Set gauge `name` to `value`
#[inline]
pub fn gauge(name: &str, value: f64, tags: &[&str], rate: f64) {
    registry::load().gauge(name, value, tags, rate);
}

/// Record `value` in histogram `name`
#[inline]
pub fn histogram(name: &str, value: f64, tags: &[&str], rate: f64) {
    registry::load().histogram(name, value, tags, rate);
}

/// Record `value` in distribution `name`
#[inline]
pub fn distribution(name: &str, value: f64, tags: &[&str], rate: f64) {
    registry::load().distribution(name, value, tags, rate);
}

/// Record `duration` as a millisecond timer
#[inline]
pub fn timing(name: &str, duration: Duration, tags: &[&str], rate: f64) {
    registry::load().timing(name, duration, tags, rate);
}

/// Increment `name` by one at full sample rate
#[inline]
pub fn simple_incr(name: &str, tags: &[&str]) {
    incr(name, tags, 1.0);
}

/// Synchronously drain the active sink; failures are logged
pub fn flush() {
    // Owned handle: the guard should not be held across blocking I/O
    registry::current().flush();
}
