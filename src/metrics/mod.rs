//! Prometheus metrics for the search service.
//!
//! Metrics are created lazily and only exported once [`init_metrics`] has
//! registered them with [`PROMETHEUS_REGISTRY`]; recording before that is
//! harmless.
//!
//! # Example
//! ```no_run
//! use facet_search::metrics::SEARCH_REQUESTS_TOTAL;
//!
//! SEARCH_REQUESTS_TOTAL
//!     .with_label_values(&["search", "ok"])
//!     .inc();
//! ```

use lazy_static::lazy_static;
use prometheus::{Counter, CounterVec, HistogramOpts, HistogramVec, Opts, Registry};
use std::time::Instant;

lazy_static! {
    /// Global Prometheus registry for all metrics
    pub static ref PROMETHEUS_REGISTRY: Registry = Registry::new();

    /// Core operations by outcome
    ///
    /// Labels: operation (search, filters, select_values, autocomplete),
    /// outcome (ok, rejected, upstream_error)
    pub static ref SEARCH_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new("search_requests_total", "Total number of search core operations")
            .namespace("facet_search"),
        &["operation", "outcome"]
    ).expect("Failed to create SEARCH_REQUESTS_TOTAL metric");

    /// Store results withheld by the access check
    pub static ref SEARCH_ITEMS_DROPPED_TOTAL: Counter = Counter::with_opts(
        Opts::new(
            "search_items_dropped_total",
            "Items returned by the store but not visible to the caller"
        )
        .namespace("facet_search")
    ).expect("Failed to create SEARCH_ITEMS_DROPPED_TOTAL metric");

    /// Collaborator call duration in seconds
    ///
    /// Labels: operation
    pub static ref UPSTREAM_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "upstream_request_duration_seconds",
            "Duration of item store and identity directory calls in seconds"
        )
        .namespace("facet_search")
        .buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["operation"]
    ).expect("Failed to create UPSTREAM_REQUEST_DURATION_SECONDS metric");
}

/// Register all metrics with the global registry
pub fn init_metrics() -> Result<(), prometheus::Error> {
    PROMETHEUS_REGISTRY.register(Box::new(SEARCH_REQUESTS_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(SEARCH_ITEMS_DROPPED_TOTAL.clone()))?;
    PROMETHEUS_REGISTRY.register(Box::new(UPSTREAM_REQUEST_DURATION_SECONDS.clone()))?;
    Ok(())
}

/// Record the outcome of one core operation
pub fn record_outcome<T, E>(operation: &str, result: &Result<T, E>, rejected: impl Fn(&E) -> bool) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) if rejected(e) => "rejected",
        Err(_) => "upstream_error",
    };
    SEARCH_REQUESTS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Observe a collaborator call that started at `start`
pub fn observe_upstream(operation: &str, start: Instant) {
    UPSTREAM_REQUEST_DURATION_SECONDS
        .with_label_values(&[operation])
        .observe(start.elapsed().as_secs_f64());
}

/// Gather all metrics in Prometheus text format
pub fn gather_metrics() -> String {
    use prometheus::Encoder;
    let encoder = prometheus::TextEncoder::new();
    let metric_families = PROMETHEUS_REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::from("# Error encoding metrics\n");
    }

    String::from_utf8(buffer).unwrap_or_else(|e| {
        tracing::error!("Failed to convert metrics to string: {}", e);
        String::from("# Error converting metrics\n")
    })
}
