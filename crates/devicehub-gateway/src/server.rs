//! Listener bootstrap.
//!
//! Binds the device and metrics listeners, then serves both as independent
//! tasks. If either fails to bind or stops, the whole process stops.

use axum::Router;
use tokio::net::TcpListener;

use devicehub_core::error::{DeviceHubError, Result};

use crate::app_state::AppState;
use crate::config::DeviceHubConfig;
use crate::router;

pub async fn run(cfg: DeviceHubConfig) -> Result<()> {
    let listen = cfg.server.listen_addr()?;
    let metrics_listen = cfg.server.metrics_listen_addr()?;

    let state = AppState::new(cfg)?;
    let devices_app = router::build_device_router(state.clone());
    let metrics_app = router::build_metrics_router(state);

    let devices_listener = bind("devices", listen).await?;
    let metrics_listener = bind("metrics", metrics_listen).await?;

    let mut devices = tokio::spawn(serve("devices", devices_listener, devices_app));
    let mut metrics = tokio::spawn(serve("metrics", metrics_listener, metrics_app));

    let finished = tokio::select! {
        r = &mut devices => r,
        r = &mut metrics => r,
    };
    devices.abort();
    metrics.abort();

    match finished {
        Ok(Ok(())) => Err(DeviceHubError::Internal("listener exited unexpectedly".into())),
        Ok(Err(e)) => Err(e),
        Err(e) => Err(DeviceHubError::Internal(format!("listener task failed: {e}"))),
    }
}

async fn bind(name: &'static str, addr: std::net::SocketAddr) -> Result<TcpListener> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| DeviceHubError::Internal(format!("{name} listener bind {addr} failed: {e}")))?;
    tracing::info!(listener = name, %addr, "listening");
    Ok(listener)
}

async fn serve(name: &'static str, listener: TcpListener, app: Router) -> Result<()> {
    axum::serve(listener, app)
        .await
        .map_err(|e| DeviceHubError::Internal(format!("{name} listener failed: {e}")))
}
