//! Error types
//!
//! Configuration errors surface to the caller of `configure`/`disable` and the
//! config loaders. Sink errors never reach emission callers; they are handed
//! to the installed [`ErrorLogger`](crate::logger::ErrorLogger).

use std::io;
use std::path::PathBuf;

/// Error returned when building or loading a statsd configuration fails.
///
/// Global state is left untouched whenever one of these is returned.
#[derive(Debug)]
pub enum ConfigError {
    /// Host is empty or contains characters no address can carry
    InvalidHost { host: String },
    /// `host:port` could not be resolved
    InvalidAddress { addr: String, source: io::Error },
    /// Resolution succeeded but yielded no socket address
    Unresolvable { addr: String },
    /// The local UDP socket could not be bound
    Bind { addr: String, source: io::Error },
    /// Config file could not be read
    Io { path: PathBuf, source: io::Error },
    /// Config text is not valid TOML for [`StatsdConfig`](crate::config::StatsdConfig)
    Parse(toml::de::Error),
    /// An environment variable holds an unusable value
    Env { var: &'static str, reason: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidHost { host } => write!(f, "invalid statsd host {:?}", host),
            ConfigError::InvalidAddress { addr, source } => {
                write!(f, "invalid statsd address {}: {}", addr, source)
            }
            ConfigError::Unresolvable { addr } => {
                write!(f, "statsd address {} resolved to nothing", addr)
            }
            ConfigError::Bind { addr, source } => {
                write!(f, "failed to bind statsd socket on {}: {}", addr, source)
            }
            ConfigError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse(e) => write!(f, "invalid statsd config: {}", e),
            ConfigError::Env { var, reason } => write!(f, "invalid value for {}: {}", var, reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidAddress { source, .. } => Some(source),
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Bind { source, .. } => Some(source),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

/// Error produced by a [`MetricSink`](crate::sink::MetricSink) while emitting.
#[derive(Debug)]
pub enum SinkError {
    /// Datagram could not be sent
    Io(io::Error),
}

impl std::fmt::Display for SinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SinkError::Io(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Io(e) => Some(e),
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(e: io::Error) -> Self {
        SinkError::Io(e)
    }
}
