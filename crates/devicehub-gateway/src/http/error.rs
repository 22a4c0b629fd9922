//! `DeviceHubError` -> HTTP response mapping.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use devicehub_core::error::{ClientCode, DeviceHubError};

/// Handler error wrapper (the core error type cannot implement axum traits here).
#[derive(Debug)]
pub struct HttpError(pub DeviceHubError);

impl From<DeviceHubError> for HttpError {
    fn from(e: DeviceHubError) -> Self {
        Self(e)
    }
}

fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        ClientCode::NotFound => StatusCode::NOT_FOUND,
        ClientCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        ClientCode::UnsupportedVersion | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = status_for(code);
        tracing::warn!(code = code.as_str(), error = %self.0, "request rejected");

        // Decode errors are echoed verbatim.
        let body = match &self.0 {
            DeviceHubError::BadRequest(msg) => msg.clone(),
            DeviceHubError::NotFound => "404 page not found".to_string(),
            DeviceHubError::MethodNotAllowed { .. } => "Method Not Allowed".to_string(),
            _ => "Internal Server Error".to_string(),
        };

        let mut resp = (status, body).into_response();
        if let DeviceHubError::MethodNotAllowed { allow } = &self.0 {
            resp.headers_mut()
                .insert(header::ALLOW, HeaderValue::from_static(*allow));
        }
        resp
    }
}
