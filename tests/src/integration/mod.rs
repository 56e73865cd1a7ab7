//! # Integration Tests
//!
//! Origin and destination deployments wired with in-memory adapters.

pub mod concurrency;
pub mod fixtures;
pub mod telemetry;
pub mod window_edges;
