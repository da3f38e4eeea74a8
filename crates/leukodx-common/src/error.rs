use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LeukodxError {
    #[error("Resource load error: {0}")]
    ResourceLoad(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Structural inference error: {0}")]
    Structural(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LeukodxError>;

/// Error returned from HTTP handlers.
///
/// Renders as a single JSON message with an optional structured `details`
/// payload (e.g. per-field validation issues), so no failure ever surfaces
/// as anything but one user-visible response.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// 422 — per-field input failures, recoverable by user correction.
    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    /// 409 — a prediction is already in flight.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// 503 — startup resources never loaded; prediction stays disabled.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    /// 502 — the classifier artifact broke its structural contract.
    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_GATEWAY, message)
    }

    /// 500 — the classifier produced an unusable value.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": self.message,
            "details": self.details,
        });
        (self.status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_statuses() {
        assert_eq!(ApiError::unprocessable("x").status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::conflict("x").status, StatusCode::CONFLICT);
        assert_eq!(ApiError::service_unavailable("x").status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(ApiError::bad_gateway("x").status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_details_attach() {
        let err = ApiError::unprocessable("Invalid input detected")
            .with_details(serde_json::json!({ "issues": ["age"] }));
        assert!(err.details.is_some());
    }
}
