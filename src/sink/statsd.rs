//! DogStatsD Sink
//!
//! Formats DogStatsD lines and sends each one as a UDP datagram:
//!
//! ```text
//! <namespace>.<name>:<value>|<type>[|@<rate>][|#<tag>,<tag>...]
//! ```
//!
//! The tag section carries exactly the configured global tags followed by the
//! per-call tags. Nothing is taken from the process environment.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use super::{should_sample, MetricSink, SinkResult};
use crate::address;
use crate::config::StatsdConfig;
use crate::error::ConfigError;

#[derive(Clone, Copy)]
enum LineType {
    Count,
    Gauge,
    Histogram,
    Distribution,
    Timing,
}

impl LineType {
    fn as_str(&self) -> &'static str {
        match self {
            LineType::Count => "c",
            LineType::Gauge => "g",
            LineType::Histogram => "h",
            LineType::Distribution => "d",
            LineType::Timing => "ms",
        }
    }
}

/// Network-backed sink bound to one agent address
pub struct StatsdSink {
    socket: UdpSocket,
    addr: String,
    target: SocketAddr,
    namespace: String,
    global_tags: Vec<String>,
}

impl StatsdSink {
    /// Build a sink for `config.host` on the standard port
    pub fn connect(config: &StatsdConfig) -> Result<Self, ConfigError> {
        if !address::is_plausible_host(&config.host) {
            return Err(ConfigError::InvalidHost {
                host: config.host.clone(),
            });
        }
        Self::with_address(&config.statsd_addr(), &config.namespace, config.tags())
    }

    /// Build a sink for an explicit `host:port`
    pub fn with_address(
        addr: &str,
        namespace: &str,
        global_tags: Vec<String>,
    ) -> Result<Self, ConfigError> {
        let target = addr
            .to_socket_addrs()
            .map_err(|source| ConfigError::InvalidAddress {
                addr: addr.to_string(),
                source,
            })?
            .next()
            .ok_or_else(|| ConfigError::Unresolvable {
                addr: addr.to_string(),
            })?;

        // An IPv4 wildcard socket cannot send to an IPv6 agent
        let from_addr = if target.is_ipv6() { "[::]:0" } else { "0.0.0.0:0" };
        let socket = UdpSocket::bind(from_addr).map_err(|source| ConfigError::Bind {
            addr: from_addr.to_string(),
            source,
        })?;

        Ok(StatsdSink {
            socket,
            addr: addr.to_string(),
            target,
            namespace: namespace.to_string(),
            global_tags,
        })
    }

    /// Address as configured, before resolution
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Resolved socket address datagrams are sent to
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Tags appended to every line, exactly as they go on the wire
    pub fn global_tags(&self) -> &[String] {
        &self.global_tags
    }

    fn format_line(&self, name: &str, value: &str, line_type: LineType, rate: f64, tags: &[&str]) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.namespace.len() + name.len() + value.len() + 32);

        if !self.namespace.is_empty() {
            buf.extend_from_slice(self.namespace.as_bytes());
            buf.push(b'.');
        }
        buf.extend_from_slice(name.as_bytes());
        buf.push(b':');
        buf.extend_from_slice(value.as_bytes());
        buf.push(b'|');
        buf.extend_from_slice(line_type.as_str().as_bytes());

        if rate < 1.0 {
            buf.extend_from_slice(b"|@");
            buf.extend_from_slice(ryu::Buffer::new().format(rate).as_bytes());
        }

        let mut first = true;
        for tag in self.global_tags.iter().map(|t| t.as_str()).chain(tags.iter().copied()) {
            let sep: &[u8] = if first { b"|#" } else { b"," };
            buf.extend_from_slice(sep);
            buf.extend_from_slice(tag.as_bytes());
            first = false;
        }

        buf
    }

    fn send(&self, name: &str, value: &str, line_type: LineType, rate: f64, tags: &[&str]) -> SinkResult {
        if !should_sample(rate) {
            return Ok(());
        }
        let line = self.format_line(name, value, line_type, rate, tags);
        let sent = self.socket.send_to(&line, self.target)?;
        if sent != line.len() {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("short datagram write: {} of {} bytes", sent, line.len()),
            )
            .into());
        }
        Ok(())
    }
}

/// Integral values go out without a fractional part, the rest in shortest form
fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        itoa::Buffer::new().format(value as i64).to_string()
    } else {
        ryu::Buffer::new().format(value).to_string()
    }
}

impl MetricSink for StatsdSink {
    fn count(&self, name: &str, value: i64, tags: &[&str], rate: f64) -> SinkResult {
        self.send(name, itoa::Buffer::new().format(value), LineType::Count, rate, tags)
    }

    fn incr(&self, name: &str, tags: &[&str], rate: f64) -> SinkResult {
        self.send(name, "1", LineType::Count, rate, tags)
    }

    fn decr(&self, name: &str, tags: &[&str], rate: f64) -> SinkResult {
        self.send(name, "-1", LineType::Count, rate, tags)
    }

    fn gauge(&self, name: &str, value: f64, tags: &[&str], rate: f64) -> SinkResult {
        self.send(name, &format_float(value), LineType::Gauge, rate, tags)
    }

    fn histogram(&self, name: &str, value: f64, tags: &[&str], rate: f64) -> SinkResult {
        self.send(name, &format_float(value), LineType::Histogram, rate, tags)
    }

    fn distribution(&self, name: &str, value: f64, tags: &[&str], rate: f64) -> SinkResult {
        self.send(name, &format_float(value), LineType::Distribution, rate, tags)
    }

    fn timing(&self, name: &str, duration: Duration, tags: &[&str], rate: f64) -> SinkResult {
        let ms = duration.as_millis() as u64;
        self.send(name, itoa::Buffer::new().format(ms), LineType::Timing, rate, tags)
    }

    // Each datagram goes out at call time; nothing is queued here.
    fn flush(&self) -> SinkResult {
        Ok(())
    }
}
