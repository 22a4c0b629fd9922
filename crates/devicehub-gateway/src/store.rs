//! In-memory device store.
//!
//! An ordered, append-only sequence of records. Firmware is the only field
//! mutated after insertion. Writers take the lock, so concurrent POST/PUT
//! requests are serialized instead of racing.

use tokio::sync::RwLock;

use devicehub_core::Device;

#[derive(Debug, Default)]
pub struct DeviceStore {
    devices: RwLock<Vec<Device>>,
}

impl DeviceStore {
    pub fn new(seed: Vec<Device>) -> Self {
        Self {
            devices: RwLock::new(seed),
        }
    }

    /// Snapshot of every record, insertion order.
    pub async fn list(&self) -> Vec<Device> {
        self.devices.read().await.clone()
    }

    /// Append unconditionally. Returns the new length.
    pub async fn create(&self, device: Device) -> usize {
        let mut devices = self.devices.write().await;
        tracing::debug!(id = device.id, mac = %device.mac, "device created");
        devices.push(device);
        devices.len()
    }

    /// Set `firmware` on every record with a matching id.
    /// Returns how many records were touched; zero is not an error.
    pub async fn update_firmware(&self, id: i64, firmware: &str) -> usize {
        let mut devices = self.devices.write().await;
        let mut touched = 0;
        for d in devices.iter_mut().filter(|d| d.id == id) {
            d.firmware = firmware.to_string();
            touched += 1;
        }
        tracing::debug!(id, firmware, touched, "firmware updated");
        touched
    }

    pub async fn len(&self) -> usize {
        self.devices.read().await.len()
    }
}
