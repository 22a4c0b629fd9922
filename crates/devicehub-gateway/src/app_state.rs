//! Shared application state for the device service.
//!
//! Owns the config, the device store and the metrics registry. Both listeners
//! hold a clone; only the device listener mutates the store.

use std::sync::Arc;

use devicehub_core::error::Result;

use crate::config::DeviceHubConfig;
use crate::obs::DeviceHubMetrics;
use crate::store::DeviceStore;

/// Label value for every upgrade counted by the PUT handler.
pub const UPGRADE_DEVICE_TYPE: &str = "router";

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: DeviceHubConfig,
    store: DeviceStore,
    metrics: DeviceHubMetrics,
}

impl AppState {
    /// Build application state: seed the store and publish startup gauges.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: DeviceHubConfig) -> Result<Self> {
        cfg.validate()?;

        let metrics = DeviceHubMetrics::new();
        metrics.devices.set(len_as_gauge(cfg.seed_devices.len()));
        metrics.info.set(&[("version", cfg.app.version.as_str())], 1);

        let store = DeviceStore::new(cfg.seed_devices.clone());
        tracing::info!(
            version = %cfg.app.version,
            seeded = cfg.seed_devices.len(),
            "device store initialised"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner { cfg, store, metrics }),
        })
    }

    pub fn cfg(&self) -> &DeviceHubConfig {
        &self.inner.cfg
    }

    pub fn store(&self) -> &DeviceStore {
        &self.inner.store
    }

    pub fn metrics(&self) -> &DeviceHubMetrics {
        &self.inner.metrics
    }
}

pub(crate) fn len_as_gauge(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX)
}
