//! Request instrumentation settings shared with the middleware.

use std::{
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::Duration,
};

use crate::config::observability::ObservabilityConfig;

static SLOW_REQUEST_THRESHOLD_MS: AtomicU64 = AtomicU64::new(1_000);
static CONTINUE_REMOTE_TRACES: AtomicBool = AtomicBool::new(false);

pub(super) fn configure(config: &ObservabilityConfig) {
    SLOW_REQUEST_THRESHOLD_MS.store(config.slow_request_threshold_ms, Ordering::Relaxed);
    CONTINUE_REMOTE_TRACES.store(
        config.otel_enabled && config.otel_parent_propagation_enabled,
        Ordering::Relaxed,
    );
}

pub(super) fn slow_request_threshold() -> Duration {
    Duration::from_millis(SLOW_REQUEST_THRESHOLD_MS.load(Ordering::Relaxed))
}

pub(super) fn continue_remote_traces() -> bool {
    CONTINUE_REMOTE_TRACES.load(Ordering::Relaxed)
}
