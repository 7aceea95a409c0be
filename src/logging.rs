//! Tracing subscriber setup
//!
//! The facade itself only emits `tracing` events; binaries that embed it can
//! call [`init_logging`] to get them on stderr.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install a global subscriber filtered by `RUST_LOG` (default `info`).
///
/// `json` selects JSON lines instead of the human-readable format. Fails if a
/// global subscriber is already set.
pub fn init_logging(json: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()?;
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()?;
    }

    tracing::debug!(json, "logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_only_once() {
        // Another test may already have claimed the global subscriber
        let _ = init_logging(false);
        assert!(init_logging(true).is_err());
    }
}
