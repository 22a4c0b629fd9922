//! Axum router wiring.
//!
//! Two routers, one per listener. Unsupported methods on known paths get a
//! 405 with an explicit `Allow` list instead of axum's generated one.
//! `/devices/` owns its whole subtree; ids that do not parse are a 404.

use axum::{
    middleware,
    routing::{any, get, put, MethodRouter},
    Router,
};

use crate::http::{devices, login, HttpError};
use crate::{app_state::AppState, ops};
use devicehub_core::error::DeviceHubError;

pub fn build_device_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/devices",
            get(devices::list_devices)
                .post(devices::create_device)
                // axum would otherwise serve HEAD from the GET handler
                .head(devices::devices_method_not_allowed)
                .fallback(devices::devices_method_not_allowed),
        )
        .route("/devices/", device_routes())
        .route("/devices/*id", device_routes())
        .route(
            "/login",
            any(login::login).layer(middleware::from_fn_with_state(
                state.clone(),
                login::time_login,
            )),
        )
        .route("/healthz", get(ops::healthz))
        .fallback(not_found)
        .with_state(state)
}

pub fn build_metrics_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .fallback(not_found)
        .with_state(state)
}

fn device_routes() -> MethodRouter<AppState> {
    put(devices::upgrade_device).fallback(devices::device_method_not_allowed)
}

async fn not_found() -> HttpError {
    DeviceHubError::NotFound.into()
}
