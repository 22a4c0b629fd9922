//! Login stub and its timing middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tokio::time::Instant;

use crate::app_state::AppState;

/// `/login`, any method.
pub async fn login(State(app): State<AppState>) -> impl IntoResponse {
    app.cfg().latency.login.apply().await;
    "Welcome to the app!"
}

/// Observes the wrapped handler's wall-clock duration into the login summary.
pub async fn time_login(State(app): State<AppState>, req: Request, next: Next) -> Response {
    let started = Instant::now();
    let resp = next.run(req).await;
    app.metrics().login_duration.observe(started.elapsed());
    resp
}
