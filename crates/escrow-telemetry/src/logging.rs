//! Structured logging.
//!
//! Every escrow lifecycle line carries the same leading fields so log
//! pipelines can index them:
//! - `swap_id`: short hex prefix of the swap identifier
//! - `operation`: create, fund, withdraw, cancel, rescue
//! - Additional context fields

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Install the global `tracing` subscriber.
///
/// Fails if a global subscriber has already been installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if !config.console_output {
        registry
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else if config.json_logs {
        // JSON output for containers/production
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);
        registry
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);
        registry
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Escrow logging initialized"
    );

    Ok(())
}

/// Log an escrow lifecycle event with standard fields.
#[macro_export]
macro_rules! log_escrow_event {
    ($level:ident, $operation:expr, $msg:expr, $swap_id:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            operation = $operation,
            swap_id = %$swap_id,
            $($($field)*,)?
            $msg
        )
    };
}
