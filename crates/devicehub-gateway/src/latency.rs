//! Simulated request latency.
//!
//! Handlers call [`LatencyConfig::apply`] to produce visible duration samples.
//! `jitter` sleeps a uniform `0..base_ms + current second` milliseconds;
//! tests configure `none` to stay deterministic.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::Deserialize;

use devicehub_core::error::{DeviceHubError, Result};

/// Upper bound for `base_ms`.
pub const MAX_BASE_MS: u64 = 60_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencyMode {
    /// Never sleep.
    #[default]
    None,
    /// Sleep exactly `base_ms`.
    Fixed,
    /// Sleep a uniform random `0..base_ms + wall-clock second` ms.
    Jitter,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LatencyConfig {
    #[serde(default)]
    pub mode: LatencyMode,
    #[serde(default)]
    pub base_ms: u64,
}

impl LatencyConfig {
    pub const fn none() -> Self {
        Self {
            mode: LatencyMode::None,
            base_ms: 0,
        }
    }

    pub const fn fixed(base_ms: u64) -> Self {
        Self {
            mode: LatencyMode::Fixed,
            base_ms,
        }
    }

    pub const fn jitter(base_ms: u64) -> Self {
        Self {
            mode: LatencyMode::Jitter,
            base_ms,
        }
    }

    pub fn validate(&self, field: &str) -> Result<()> {
        if self.base_ms > MAX_BASE_MS {
            return Err(DeviceHubError::BadRequest(format!(
                "{field}.base_ms must be at most {MAX_BASE_MS}"
            )));
        }
        Ok(())
    }

    /// Pick the delay for one request.
    pub fn delay(&self) -> Duration {
        match self.mode {
            LatencyMode::None => Duration::ZERO,
            LatencyMode::Fixed => Duration::from_millis(self.base_ms),
            LatencyMode::Jitter => {
                let second = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_secs()
                    % 60;
                let bound = self.base_ms + second;
                if bound == 0 {
                    return Duration::ZERO;
                }
                Duration::from_millis(rand::thread_rng().gen_range(0..bound))
            }
        }
    }

    pub async fn apply(&self) {
        let d = self.delay();
        if !d.is_zero() {
            tokio::time::sleep(d).await;
        }
    }
}
