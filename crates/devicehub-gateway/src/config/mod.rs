//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use devicehub_core::error::{DeviceHubError, Result};

pub use schema::{AppSection, DeviceHubConfig, LatencySection, ServerSection};

/// Env var naming the config file.
pub const CONFIG_ENV: &str = "DEVICEHUB_CONFIG";
/// Config file used when `CONFIG_ENV` is unset.
pub const DEFAULT_CONFIG_PATH: &str = "devicehub.yaml";

pub fn load_from_file(path: &str) -> Result<DeviceHubConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| DeviceHubError::Internal(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<DeviceHubConfig> {
    let cfg: DeviceHubConfig = serde_yaml::from_str(s)
        .map_err(|e| DeviceHubError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load from `$DEVICEHUB_CONFIG`, else `devicehub.yaml`, else built-in defaults.
///
/// An explicitly named file must exist; only the implicit default may be absent.
pub fn load() -> Result<DeviceHubConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => load_from_file(&path),
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        Err(_) => {
            tracing::warn!(path = DEFAULT_CONFIG_PATH, "config file not found, using defaults");
            let cfg = DeviceHubConfig::default();
            cfg.validate()?;
            Ok(cfg)
        }
    }
}
