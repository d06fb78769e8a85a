//! Metrics setup and update for query execution.

use prometheus::core::{AtomicU64, GenericCounter};
use prometheus::{Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct Metrics {
    pub query_total: GenericCounter<AtomicU64>,
    pub query_failure_total: GenericCounter<AtomicU64>,
    pub query_duration_seconds: Histogram,
}

/// Create a new int counter metric and register it with the provided Prometheus Registry
fn add_int_counter_metric(
    metrics_registry: &Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<GenericCounter<AtomicU64>, prometheus::Error> {
    let int_counter =
        prometheus::IntCounter::with_opts(prometheus::Opts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(int_counter.clone()))?;
    Ok(int_counter)
}

/// Create a new histogram metric and register it with the provided Prometheus Registry
fn add_histogram_metric(
    metrics_registry: &Registry,
    metric_name: &str,
    metric_description: &str,
) -> Result<Histogram, prometheus::Error> {
    let histogram = Histogram::with_opts(HistogramOpts::new(metric_name, metric_description))?;
    metrics_registry.register(Box::new(histogram.clone()))?;
    Ok(histogram)
}

/// Setup the counters and histogram used to produce Prometheus metrics
pub fn initialise_metrics(metrics_registry: &Registry) -> Result<Metrics, prometheus::Error> {
    let query_total = add_int_counter_metric(
        metrics_registry,
        "reservations_query_total",
        "Total successful round trips.",
    )?;

    let query_failure_total = add_int_counter_metric(
        metrics_registry,
        "reservations_query_failure_total",
        "Total round trips that failed in the database or while decoding rows.",
    )?;

    let query_duration_seconds = add_histogram_metric(
        metrics_registry,
        "reservations_query_duration_seconds",
        "Time spent on a round trip, in seconds.",
    )?;

    Ok(Metrics {
        query_total,
        query_failure_total,
        query_duration_seconds,
    })
}

impl Metrics {
    /// Metrics registered with a throwaway registry.
    pub fn unregistered() -> Result<Metrics, prometheus::Error> {
        initialise_metrics(&Registry::new())
    }
}
