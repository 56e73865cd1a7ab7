//! Prometheus metrics for escrow deployments.
//!
//! All metrics follow the naming convention: `escrow_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., escrow_created_total)
//! - **Gauge**: Value that can go up or down (e.g., escrow_active_swaps)
//! - **Histogram**: Distribution of values (e.g., escrow_operation_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, CounterVec, Encoder, Gauge, Histogram, HistogramVec, Opts, Registry,
    TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // LIFECYCLE METRICS
    // =========================================================================

    /// Escrows registered
    pub static ref ESCROW_CREATED: CounterVec = CounterVec::new(
        Opts::new("escrow_created_total", "Total escrows created"),
        &["role"]  // role: source/destination
    ).expect("metric creation failed");

    /// Funding calls accepted
    pub static ref ESCROW_FUNDED: CounterVec = CounterVec::new(
        Opts::new("escrow_funded_total", "Total funding calls accepted"),
        &["role"]
    ).expect("metric creation failed");

    /// Escrows reaching a terminal stage
    pub static ref ESCROW_COMPLETED: CounterVec = CounterVec::new(
        Opts::new("escrow_completed_total", "Escrows reaching a terminal stage"),
        &["role", "outcome"]  // outcome: withdrawn/cancelled/rescued
    ).expect("metric creation failed");

    /// Escrows still in the Created stage
    pub static ref ESCROW_ACTIVE: Gauge = Gauge::new(
        "escrow_active_swaps",
        "Number of escrows awaiting withdrawal, cancellation or rescue"
    ).expect("metric creation failed");

    // =========================================================================
    // CUSTODY METRICS
    // =========================================================================

    /// Value moved through custody
    pub static ref ESCROW_CUSTODY_VOLUME: CounterVec = CounterVec::new(
        Opts::new("escrow_custody_volume_total", "Token units moved through custody"),
        &["direction"]  // direction: lock/release
    ).expect("metric creation failed");

    // =========================================================================
    // LATENCY & ERROR METRICS
    // =========================================================================

    /// Operation duration
    pub static ref ESCROW_OPERATION_DURATION: HistogramVec = HistogramVec::new(
        prometheus::HistogramOpts::new(
            "escrow_operation_duration_seconds",
            "Time spent executing escrow operations"
        ).buckets(exponential_buckets(0.00001, 2.0, 15).expect("bucket layout")),
        &["operation"]
    ).expect("metric creation failed");

    /// Rejected operations by type
    pub static ref ESCROW_ERRORS: CounterVec = CounterVec::new(
        Opts::new("escrow_errors_total", "Rejected escrow operations by error type"),
        &["operation", "error_type"]
    ).expect("metric creation failed");
}

/// Register all metrics with the global registry.
///
/// Calling this twice fails with [`TelemetryError::MetricsInit`].
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Lifecycle
        Box::new(ESCROW_CREATED.clone()),
        Box::new(ESCROW_FUNDED.clone()),
        Box::new(ESCROW_COMPLETED.clone()),
        Box::new(ESCROW_ACTIVE.clone()),
        // Custody
        Box::new(ESCROW_CUSTODY_VOLUME.clone()),
        // Latency & errors
        Box::new(ESCROW_OPERATION_DURATION.clone()),
        Box::new(ESCROW_ERRORS.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(())
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing one escrow operation. Observation happens on drop.
pub fn time_operation(operation: &str) -> HistogramTimer {
    HistogramTimer::new(&ESCROW_OPERATION_DURATION.with_label_values(&[operation]))
}
