//! Process-wide client slot
//!
//! Holds the one [`Metrics`] every free function routes to. The slot is an
//! `ArcSwap`, so readers get a complete sink+logger pair without locking and a
//! replacement is a single pointer swap. It starts out disabled.

use arc_swap::{ArcSwap, Guard};
use once_cell::sync::Lazy;
use std::sync::Arc;

use crate::logger::TracingLogger;
use crate::metrics::Metrics;

static CURRENT: Lazy<ArcSwap<Metrics>> =
    Lazy::new(|| ArcSwap::from_pointee(Metrics::disabled(Arc::new(TracingLogger))));

/// Snapshot for a short emission call
#[inline]
pub(crate) fn load() -> Guard<Arc<Metrics>> {
    CURRENT.load()
}

/// Owned handle to the active client, safe to keep around
pub fn current() -> Arc<Metrics> {
    CURRENT.load_full()
}

/// Swap in a new client, returning the one it replaced
pub(crate) fn replace(metrics: Metrics) -> Arc<Metrics> {
    CURRENT.swap(Arc::new(metrics))
}
