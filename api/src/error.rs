use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::schemas::ParseOptionError;

/// Failures surfaced to the client as `{ "error": "<message>" }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing form field: {0}")]
    MissingField(&'static str),
    #[error(transparent)]
    InvalidOption(#[from] ParseOptionError),
    #[error("unsupported video format: {0}")]
    UnsupportedFormat(String),
    #[error("video exceeds the {limit_mb} MB upload limit")]
    TooLarge { limit_mb: u64 },
    #[error("malformed upload: {0}")]
    Multipart(String),
    #[error("analysis failed: {0}")]
    Analysis(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_)
            | ApiError::InvalidOption(_)
            | ApiError::Multipart(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Analysis(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::warn!("rejected analyze request: {self}");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
