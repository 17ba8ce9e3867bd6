//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Cycle runner (cycles, new items, failures)
//! - External services (search provider, notification webhook)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Cycle Metrics
// =============================================================================

/// Cycles run total by result.
pub static CYCLES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("scholar_cycles_total", "Total watch cycles run"),
        &["result"], // "ok", "failed"
    )
    .unwrap()
});

/// Cycle duration in seconds.
pub static CYCLE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new("scholar_cycle_duration_seconds", "Duration of watch cycles")
            .buckets(vec![0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0, 300.0]),
        &["result"],
    )
    .unwrap()
});

/// New items delivered total.
pub static NEW_ITEMS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "scholar_new_items_total",
        "Total newly found results delivered",
    )
    .unwrap()
});

/// Keywords skipped because of a provider failure.
pub static PROVIDER_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "scholar_provider_failures_total",
        "Total keyword fetches that failed at the search provider",
    )
    .unwrap()
});

/// Notification delivery failures (claim rolled back).
pub static NOTIFY_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "scholar_notify_failures_total",
            "Total notification delivery failures",
        ),
        &["cause"], // "missing_webhook", "transport", "timeout", "status"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(CYCLES_TOTAL.clone()),
        Box::new(CYCLE_DURATION.clone()),
        Box::new(NEW_ITEMS_TOTAL.clone()),
        Box::new(PROVIDER_FAILURES_TOTAL.clone()),
        Box::new(NOTIFY_FAILURES_TOTAL.clone()),
    ]
}
