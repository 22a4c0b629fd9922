//! DeviceHub gateway library entry.
//!
//! Wires the config loader, device store, metrics registry and HTTP handlers
//! into the two listeners (devices, metrics). It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod http;
pub mod latency;
pub mod obs;
pub mod ops;
pub mod router;
pub mod server;
pub mod store;
