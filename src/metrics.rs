//! Vendor-agnostic metrics collection via a pluggable sink.
//!
//! Only available with the `observability` feature. The pure
//! [`evaluate`](crate::evaluate()) function never records anything; events come
//! from [`AccessEvaluator`](crate::AccessEvaluator) and
//! [`MemoryEntitlementStore`](crate::MemoryEntitlementStore).
//!
//! ```ignore
//! use entitlement_core::metrics::{BatchStats, EvaluationStats, MetricsSink, ReloadStats};
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//!
//! struct DenyCounter(AtomicU64);
//!
//! impl MetricsSink for DenyCounter {
//!     fn on_evaluation(&self, stats: &EvaluationStats) {
//!         if !stats.has_access && !stats.is_loading {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn on_reload(&self, _stats: &ReloadStats) {}
//! }
//!
//! entitlement_core::metrics::set_sink(Arc::new(DenyCounter(AtomicU64::new(0))));
//! ```

use serde::Serialize;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::warn;

use crate::types::AccessReason;

/// Snapshot of a single access check, passed to [`MetricsSink::on_evaluation`].
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationStats {
    /// Time spent snapshotting collaborators and evaluating
    pub duration: Duration,
    pub has_access: bool,
    pub is_loading: bool,
    /// `None` while loading
    pub access_reason: Option<AccessReason>,
    /// Requirement in its display form, e.g. `any_of[trial_access]`
    pub requirement: String,
}

/// Snapshot of a batch check over a list of gated items.
#[derive(Debug, Clone, Serialize)]
pub struct BatchStats {
    pub duration: Duration,
    /// Number of items offered for evaluation
    pub items: usize,
    /// Number of items that came back locked
    pub locked: usize,
    /// True if the batch was skipped because the subject was loading
    pub is_loading: bool,
}

/// Emitted when an entitlement store replaces its grants.
#[derive(Debug, Clone, Serialize)]
pub struct ReloadStats {
    pub reload_time: std::time::SystemTime,
    pub grants: usize,
}

/// Consumer of access metrics.
///
/// Called synchronously on the evaluation path, so implementations must be
/// cheap and thread-safe.
pub trait MetricsSink: Send + Sync {
    fn on_evaluation(&self, stats: &EvaluationStats);

    fn on_reload(&self, stats: &ReloadStats);

    fn on_batch(&self, _stats: &BatchStats) {
        // Default: no-op
    }
}

struct NoOpSink;

impl MetricsSink for NoOpSink {
    fn on_evaluation(&self, _stats: &EvaluationStats) {}
    fn on_reload(&self, _stats: &ReloadStats) {}
}

static SINK: OnceLock<Arc<dyn MetricsSink>> = OnceLock::new();

// Recording never initializes the slot, so a sink installed after the first
// evaluation still takes effect.
fn sink() -> &'static dyn MetricsSink {
    match SINK.get() {
        Some(sink) => sink.as_ref(),
        None => &NoOpSink,
    }
}

/// Install the global metrics sink.
///
/// Install it once at startup. Events recorded before installation are
/// dropped, and later calls are ignored with a warning.
pub fn set_sink(sink: Arc<dyn MetricsSink>) {
    if SINK.set(sink).is_err() {
        warn!(
            "Metrics sink was already initialized. Ignoring subsequent set_sink call."
        );
    }
}

pub(crate) fn record_evaluation(
    duration: Duration,
    has_access: bool,
    is_loading: bool,
    access_reason: Option<AccessReason>,
    requirement: String,
) {
    sink().on_evaluation(&EvaluationStats {
        duration,
        has_access,
        is_loading,
        access_reason,
        requirement,
    });
}

pub(crate) fn record_batch(duration: Duration, items: usize, locked: usize, is_loading: bool) {
    sink().on_batch(&BatchStats {
        duration,
        items,
        locked,
        is_loading,
    });
}

pub(crate) fn record_reload(grants: usize) {
    sink().on_reload(&ReloadStats {
        reload_time: std::time::SystemTime::now(),
        grants,
    });
}
