//! Telemetry configuration from environment variables.

use serde::{Deserialize, Serialize};
use std::env;

/// Configuration for escrow logging and metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Service name attached to every log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether to enable console output (for development)
    pub console_output: bool,

    /// Whether to enable JSON formatted logs
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "htlc-escrow".to_string(),
            log_level: "info".to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ESCROW_SERVICE_NAME`: Service name (default: htlc-escrow)
    /// - `ESCROW_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `ESCROW_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `ESCROW_JSON_LOGS`: Enable JSON logs (default: false in dev, true in containers)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("ESCROW_SERVICE_NAME")
                .unwrap_or_else(|_| "htlc-escrow".to_string()),

            log_level: env::var("ESCROW_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            console_output: env::var("ESCROW_CONSOLE_OUTPUT")
                .map(|v| parse_flag(&v, true))
                .unwrap_or(true),

            json_logs: env::var("ESCROW_JSON_LOGS")
                .map(|v| parse_flag(&v, false))
                .unwrap_or(is_container),
        }
    }

    /// Configuration for one ledger deployment (`origin` or `destination`).
    pub fn for_deployment(side: &str) -> Self {
        let mut config = Self::from_env();
        config.service_name = format!("{}-{}", config.service_name, side);
        config
    }
}

fn parse_flag(value: &str, default: bool) -> bool {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => true,
        "false" | "0" | "no" => false,
        _ => default,
    }
}
