//! Shared error type across DeviceHub crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Malformed body or unserializable response.
    BadRequest,
    /// Unknown path or invalid path parameter.
    NotFound,
    /// Known path, unsupported method.
    MethodNotAllowed,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, DeviceHubError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum DeviceHubError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found")]
    NotFound,
    #[error("method not allowed (allow: {allow})")]
    MethodNotAllowed { allow: &'static str },
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl DeviceHubError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            DeviceHubError::BadRequest(_) => ClientCode::BadRequest,
            DeviceHubError::NotFound => ClientCode::NotFound,
            DeviceHubError::MethodNotAllowed { .. } => ClientCode::MethodNotAllowed,
            DeviceHubError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            DeviceHubError::Internal(_) => ClientCode::Internal,
        }
    }
}
