//! DeviceHub core: the device record and the error surface shared by the
//! gateway and its tests.
//!
//! This crate carries no transport or runtime dependencies so the model can be
//! reused by tooling that never starts a server.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. All fallible paths
//! surface as `DeviceHubError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod device;
pub mod error;

pub use device::{default_seed, Device};
/// Shared result type.
pub use error::{DeviceHubError, Result};
