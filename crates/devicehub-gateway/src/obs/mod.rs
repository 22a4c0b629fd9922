//! Lightweight in-process metrics.
//!
//! Metrics are stored as atomics (plus a bounded sample window for the summary)
//! and rendered in Prometheus text exposition format by the `/metrics` handler
//! on the metrics listener.

pub mod metrics;

pub use metrics::DeviceHubMetrics;
