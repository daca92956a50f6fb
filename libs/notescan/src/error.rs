use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::server::with_cors;

/// Everything that can terminate a recognition request. Each variant maps
/// to one HTTP status; nothing propagates past the handler as a panic.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("API key not configured")]
    MissingApiKey,
    #[error("invalid JSON")]
    InvalidJson,
    #[error("image not found")]
    MissingImage,
    #[error("Vision API error: {body}")]
    Provider { status: u16, body: String },
    #[error("timeout waiting for Vision API")]
    Timeout,
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl OcrError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            OcrError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            OcrError::InvalidJson => StatusCode::BAD_REQUEST,
            OcrError::MissingImage => StatusCode::BAD_REQUEST,
            // The provider's own status is relayed to the caller.
            OcrError::Provider { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            OcrError::Timeout => StatusCode::GATEWAY_TIMEOUT,
            OcrError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for OcrError {
    fn into_response(self) -> Response {
        if let OcrError::Internal(err) = &self {
            log::error!("Request failed: {:?}", err);
        }
        let body = json!({ "error": self.to_string() });
        with_cors((self.status_code(), Json(body)).into_response())
    }
}
