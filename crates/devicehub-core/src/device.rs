//! Device record (JSON).
//!
//! Decoding is lenient: missing fields fall back to zero values and unknown
//! fields are ignored, so any well-formed JSON object is a valid record.

use serde::{Deserialize, Serialize};

/// A connected network device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Device {
    /// Device id. Not checked for uniqueness.
    pub id: i64,
    /// MAC address, free-form.
    pub mac: String,
    /// Installed firmware version.
    pub firmware: String,
}

impl Device {
    pub fn new(id: i64, mac: impl Into<String>, firmware: impl Into<String>) -> Self {
        Self {
            id,
            mac: mac.into(),
            firmware: firmware.into(),
        }
    }

    /// Decode a single record from a request body.
    pub fn from_json(body: &[u8]) -> crate::Result<Self> {
        serde_json::from_slice(body).map_err(|e| crate::DeviceHubError::BadRequest(e.to_string()))
    }
}

/// Devices present at startup when no seed list is configured.
pub fn default_seed() -> Vec<Device> {
    vec![
        Device::new(1, "5F-33-CC-1F-43-82", "2.1.6"),
        Device::new(2, "EF-2B-C4-F5-D6-34", "2.1.6"),
    ]
}
