//! HTTP handlers for the device listener.
//!
//! - `/devices`      : GET list, POST create
//! - `/devices/*id`  : PUT firmware upgrade (the whole `/devices/` subtree)
//! - `/login`        : timed stub

pub mod devices;
pub mod error;
pub mod login;

pub use error::HttpError;
