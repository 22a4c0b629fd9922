//! Top-level facade crate for DeviceHub.
//!
//! Re-exports the device model and the HTTP gateway so users can depend on a single crate.

pub mod core {
    pub use devicehub_core::*;
}

pub mod gateway {
    pub use devicehub_gateway::*;
}
