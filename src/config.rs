//! Statsd Configuration
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DD_AGENT_HOST` | `127.0.0.1` | Agent host (port is always 8125) |
//! | `DD_METRIC_NAMESPACE` | `` | Prefix for every metric name |
//! | `DD_ENV` | `` | Adds an `env:<value>` tag |
//! | `DD_COMPONENT` | `` | Adds a `component:<value>` tag |
//! | `DD_METRICS_DISABLED` | `false` | Start in disabled mode |
//!
//! The same fields can be loaded from TOML:
//!
//! ```toml
//! host = "10.0.0.7"
//! namespace = "billing"
//! env = "prod"
//! component = "api"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::address;
use crate::error::ConfigError;

/// Facade configuration: where to send metrics and how to label them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsdConfig {
    /// When false, [`apply`](crate::apply) selects the disabled sink
    pub enabled: bool,
    /// Agent host: IPv4, hostname, or bare IPv6 literal
    pub host: String,
    /// Metric-name prefix; empty means none
    pub namespace: String,
    /// Environment tag value; empty means omit
    pub env: String,
    /// Component tag value; empty means omit
    pub component: String,
}

impl Default for StatsdConfig {
    fn default() -> Self {
        StatsdConfig {
            enabled: true,
            host: "127.0.0.1".to_string(),
            namespace: String::new(),
            env: String::new(),
            component: String::new(),
        }
    }
}

impl StatsdConfig {
    pub fn new(host: &str, namespace: &str, env: &str, component: &str) -> Self {
        StatsdConfig {
            enabled: true,
            host: host.to_string(),
            namespace: namespace.to_string(),
            env: env.to_string(),
            component: component.to_string(),
        }
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StatsdConfig::default();

        if let Some(host) = lookup("DD_AGENT_HOST").filter(|h| !h.is_empty()) {
            config.host = host;
        }
        if let Some(namespace) = lookup("DD_METRIC_NAMESPACE") {
            config.namespace = namespace;
        }
        if let Some(env) = lookup("DD_ENV") {
            config.env = env;
        }
        if let Some(component) = lookup("DD_COMPONENT") {
            config.component = component;
        }
        if let Some(disabled) = lookup("DD_METRICS_DISABLED") {
            config.enabled = !parse_flag("DD_METRICS_DISABLED", &disabled)?;
        }

        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Global tags: `env:<env>` then `component:<component>`, each only when set
    pub fn tags(&self) -> Vec<String> {
        let mut tags = Vec::with_capacity(2);
        if !self.env.is_empty() {
            tags.push(format!("env:{}", self.env));
        }
        if !self.component.is_empty() {
            tags.push(format!("component:{}", self.component));
        }
        tags
    }

    /// Agent address in `host:8125` form
    pub fn statsd_addr(&self) -> String {
        address::format_address(&self.host)
    }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::Env {
            var,
            reason: format!("expected a boolean, got {:?}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_tags_env_only() {
        let config = StatsdConfig::new("127.0.0.1", "svc", "prod", "");
        assert_eq!(config.tags(), vec!["env:prod".to_string()]);
    }

    #[test]
    fn test_tags_component_only() {
        let config = StatsdConfig::new("127.0.0.1", "svc", "", "api");
        assert_eq!(config.tags(), vec!["component:api".to_string()]);
    }

    #[test]
    fn test_tags_order_and_empty() {
        let both = StatsdConfig::new("127.0.0.1", "svc", "prod", "api");
        assert_eq!(both.tags(), vec!["env:prod", "component:api"]);

        let neither = StatsdConfig::new("127.0.0.1", "svc", "", "");
        assert!(neither.tags().is_empty());
    }

    #[test]
    fn test_statsd_addr_brackets_ipv6() {
        assert_eq!(StatsdConfig::new("::1", "", "", "").statsd_addr(), "[::1]:8125");
        assert_eq!(StatsdConfig::default().statsd_addr(), "127.0.0.1:8125");
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = StatsdConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StatsdConfig::default());
    }

    #[test]
    fn test_from_lookup_reads_all_vars() {
        let config = StatsdConfig::from_lookup(lookup_from(&[
            ("DD_AGENT_HOST", "dd-agent"),
            ("DD_METRIC_NAMESPACE", "billing"),
            ("DD_ENV", "staging"),
            ("DD_COMPONENT", "worker"),
            ("DD_METRICS_DISABLED", "true"),
        ]))
        .unwrap();

        assert!(!config.enabled);
        assert_eq!(config.host, "dd-agent");
        assert_eq!(config.namespace, "billing");
        assert_eq!(config.tags(), vec!["env:staging", "component:worker"]);
    }

    #[test]
    fn test_from_lookup_rejects_bad_flag() {
        let err = StatsdConfig::from_lookup(lookup_from(&[("DD_METRICS_DISABLED", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Env { var: "DD_METRICS_DISABLED", .. }));
    }

    #[test]
    fn test_from_toml_partial() {
        let config = StatsdConfig::from_toml_str("host = \"10.1.2.3\"\nenv = \"prod\"\n").unwrap();
        assert!(config.enabled);
        assert_eq!(config.host, "10.1.2.3");
        assert_eq!(config.namespace, "");
        assert_eq!(config.tags(), vec!["env:prod"]);
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = StatsdConfig::from_toml_str("host = 42").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statsd.toml");
        std::fs::write(&path, "enabled = false\nnamespace = \"jobs\"\n").unwrap();

        let config = StatsdConfig::from_file(&path).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.namespace, "jobs");

        let missing = StatsdConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
