use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tokio::time::Instant;

use devicehub_core::error::DeviceHubError;
use devicehub_core::Device;

use crate::app_state::{len_as_gauge, AppState, UPGRADE_DEVICE_TYPE};
use crate::http::HttpError;

pub const DEVICES_ALLOW: &str = "GET, POST";
pub const DEVICE_ALLOW: &str = "PUT";

/// `GET /devices`
pub async fn list_devices(State(app): State<AppState>) -> Result<Response, HttpError> {
    let started = Instant::now();

    let devices = app.store().list().await;
    let body = serde_json::to_vec(&devices)
        .map_err(|e| DeviceHubError::BadRequest(e.to_string()))?;

    app.cfg().latency.list_devices.apply().await;

    app.metrics()
        .duration
        .observe(&[("method", "GET"), ("status", "200")], started.elapsed());

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}

/// `POST /devices`
pub async fn create_device(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<Response, HttpError> {
    let device = Device::from_json(&body)?;

    let total = app.store().create(device).await;
    app.metrics().devices.set(len_as_gauge(total));

    Ok((StatusCode::CREATED, "Device created!").into_response())
}

/// `PUT /devices/*id`
///
/// A bad id (including an empty one on `/devices/`) fails before the body is read.
pub async fn upgrade_device(
    State(app): State<AppState>,
    raw_id: Option<Path<String>>,
    body: Bytes,
) -> Result<Response, HttpError> {
    let raw_id = raw_id.map(|Path(raw)| raw).unwrap_or_default();
    let id = parse_device_id(&raw_id)?;
    let update = Device::from_json(&body)?;

    let touched = app.store().update_firmware(id, &update.firmware).await;
    if touched == 0 {
        tracing::debug!(id, "upgrade matched no device");
    }

    app.cfg().latency.upgrade_device.apply().await;

    app.metrics().upgrades.inc(&[("type", UPGRADE_DEVICE_TYPE)]);

    Ok((StatusCode::ACCEPTED, "Upgrading...").into_response())
}

/// Any other method on `/devices`.
pub async fn devices_method_not_allowed() -> HttpError {
    DeviceHubError::MethodNotAllowed { allow: DEVICES_ALLOW }.into()
}

/// Any other method under `/devices/`.
pub async fn device_method_not_allowed() -> HttpError {
    DeviceHubError::MethodNotAllowed { allow: DEVICE_ALLOW }.into()
}

/// Path ids must be integers >= 1.
pub fn parse_device_id(raw: &str) -> Result<i64, DeviceHubError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id >= 1)
        .ok_or(DeviceHubError::NotFound)
}
