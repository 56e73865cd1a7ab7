//! # Escrow Telemetry
//!
//! Logging and metrics for HTLC escrow deployments.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` with env filtering, pretty or JSON output
//! - **Metrics**: Prometheus counters, gauges and histograms
//!
//! ## Usage
//!
//! ```rust,ignore
//! use escrow_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::for_deployment("destination");
//!     init_telemetry(&config).expect("Failed to init telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ESCROW_SERVICE_NAME` | `htlc-escrow` | Service name in logs |
//! | `ESCROW_LOG_LEVEL` | `info` | Log level filter |
//! | `ESCROW_JSON_LOGS` | `false` | JSON log output |
//! | `ESCROW_CONSOLE_OUTPUT` | `true` | Console output |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, time_operation, HistogramTimer, ESCROW_ACTIVE,
    ESCROW_COMPLETED, ESCROW_CREATED, ESCROW_CUSTODY_VOLUME, ESCROW_ERRORS, ESCROW_FUNDED,
    ESCROW_OPERATION_DURATION,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install logging and register metrics.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_logging(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}

/// Convenience macro for adding a value to a counter.
#[macro_export]
macro_rules! metric_add {
    ($metric:expr, $labels:expr, $value:expr) => {
        $metric.with_label_values($labels).inc_by($value)
    };
}
