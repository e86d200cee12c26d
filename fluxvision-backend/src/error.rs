use crate::store::StoreError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures surfaced to API callers as `{"detail": "..."}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("InfluxDB credentials not configured yet")]
    NotConfigured,
    #[error("No credentials saved")]
    NotFound,
    #[error("Failed to read credentials: {0}")]
    ReadCredentials(#[source] StoreError),
    #[error("Failed to save credentials: {0}")]
    SaveCredentials(#[source] StoreError),
    #[error("{0}")]
    InvalidBody(#[from] JsonRejection),
    /// InfluxDB unreachable or unhealthy; the message is preformatted.
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotConfigured => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::ReadCredentials(_) | ApiError::SaveCredentials(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InvalidBody(rejection) => rejection.status(),
            ApiError::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
