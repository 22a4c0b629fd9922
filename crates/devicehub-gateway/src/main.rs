//! DeviceHub gateway
//!
//! - Device API on `server.listen`: /devices, /devices/*id, /login
//! - Prometheus scrape on `server.metrics_listen`: /metrics

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use devicehub_gateway::{config, server};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(version = %cfg.app.version, "devicehub-gateway starting");
    if let Err(e) = server::run(cfg).await {
        tracing::error!(error = %e, "devicehub-gateway stopped");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
