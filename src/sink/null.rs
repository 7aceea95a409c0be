//! Null sink backing the disabled mode

use std::io;
use std::time::Duration;

use super::{MetricSink, SinkResult};

/// Discards every metric and every byte written to it.
///
/// Besides the metric capability it behaves like a statsd writer whose
/// `write`, `close` and `set_write_timeout` always succeed.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl NullSink {
    #[inline]
    pub fn close(&self) -> io::Result<()> {
        Ok(())
    }

    #[inline]
    pub fn set_write_timeout(&self, _timeout: Option<Duration>) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for NullSink {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }

    #[inline]
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl MetricSink for NullSink {
    #[inline]
    fn count(&self, _name: &str, _value: i64, _tags: &[&str], _rate: f64) -> SinkResult {
        Ok(())
    }
    #[inline]
    fn incr(&self, _name: &str, _tags: &[&str], _rate: f64) -> SinkResult {
        Ok(())
    }
    #[inline]
    fn decr(&self, _name: &str, _tags: &[&str], _rate: f64) -> SinkResult {
        Ok(())
    }
    #[inline]
    fn gauge(&self, _name: &str, _value: f64, _tags: &[&str], _rate: f64) -> SinkResult {
        Ok(())
    }
    #[inline]
    fn histogram(&self, _name: &str, _value: f64, _tags: &[&str], _rate: f64) -> SinkResult {
        Ok(())
    }
    #[inline]
    fn distribution(&self, _name: &str, _value: f64, _tags: &[&str], _rate: f64) -> SinkResult {
        Ok(())
    }
    #[inline]
    fn timing(&self, _name: &str, _duration: Duration, _tags: &[&str], _rate: f64) -> SinkResult {
        Ok(())
    }
}
