use std::net::SocketAddr;

use serde::Deserialize;

use devicehub_core::error::{DeviceHubError, Result};
use devicehub_core::{default_seed, Device};

use crate::latency::LatencyConfig;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceHubConfig {
    pub version: u32,

    #[serde(default)]
    pub app: AppSection,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub latency: LatencySection,

    #[serde(default = "default_seed")]
    pub seed_devices: Vec<Device>,
}

impl Default for DeviceHubConfig {
    fn default() -> Self {
        Self {
            version: 1,
            app: AppSection::default(),
            server: ServerSection::default(),
            latency: LatencySection::default(),
            seed_devices: default_seed(),
        }
    }
}

impl DeviceHubConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(DeviceHubError::UnsupportedVersion);
        }
        if self.app.version.trim().is_empty() {
            return Err(DeviceHubError::BadRequest("app.version must not be empty".into()));
        }

        self.server.validate()?;
        self.latency.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppSection {
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            version: default_app_version(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_metrics_listen")]
    pub metrics_listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_listen: default_metrics_listen(),
        }
    }
}

impl ServerSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        parse_addr("server.listen", &self.listen)
    }

    pub fn metrics_listen_addr(&self) -> Result<SocketAddr> {
        parse_addr("server.metrics_listen", &self.metrics_listen)
    }

    pub fn validate(&self) -> Result<()> {
        let devices = self.listen_addr()?;
        let metrics = self.metrics_listen_addr()?;
        if devices == metrics && devices.port() != 0 {
            return Err(DeviceHubError::BadRequest(
                "server.listen and server.metrics_listen must differ".into(),
            ));
        }
        Ok(())
    }
}

fn parse_addr(field: &str, raw: &str) -> Result<SocketAddr> {
    raw.parse()
        .map_err(|e| DeviceHubError::BadRequest(format!("{field} must be a valid SocketAddr: {e}")))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LatencySection {
    #[serde(default = "default_list_latency")]
    pub list_devices: LatencyConfig,

    #[serde(default = "default_upgrade_latency")]
    pub upgrade_device: LatencyConfig,

    #[serde(default = "default_login_latency")]
    pub login: LatencyConfig,
}

impl Default for LatencySection {
    fn default() -> Self {
        Self {
            list_devices: default_list_latency(),
            upgrade_device: default_upgrade_latency(),
            login: default_login_latency(),
        }
    }
}

impl LatencySection {
    pub fn validate(&self) -> Result<()> {
        self.list_devices.validate("latency.list_devices")?;
        self.upgrade_device.validate("latency.upgrade_device")?;
        self.login.validate("latency.login")?;
        Ok(())
    }
}

fn default_app_version() -> String {
    "2.10.5".into()
}
fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_metrics_listen() -> String {
    "0.0.0.0:8081".into()
}
fn default_list_latency() -> LatencyConfig {
    LatencyConfig::jitter(200)
}
fn default_upgrade_latency() -> LatencyConfig {
    LatencyConfig::jitter(1000)
}
fn default_login_latency() -> LatencyConfig {
    LatencyConfig::jitter(200)
}
