use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;
use crate::vision::strip_data_url_prefix;

use super::{with_cors, AppState};

const CONFIDENCE: f64 = 0.95;

#[derive(Deserialize)]
struct RecognizeRequest {
    image: Option<String>,
}

#[derive(Serialize)]
struct RecognizeResponse {
    text: String,
    confidence: f64,
}

#[derive(Serialize)]
struct NoTextResponse {
    text: String,
    message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn recognize(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return preflight();
    }

    if method != Method::POST {
        return with_cors(
            (
                StatusCode::METHOD_NOT_ALLOWED,
                Json(ErrorResponse {
                    error: "only POST allowed".to_string(),
                }),
            )
                .into_response(),
        );
    }

    match process(&state, &body).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn process(state: &AppState, body: &[u8]) -> Result<Response, OcrError> {
    // The key is checked before the body so a misconfigured deployment
    // reports 500 no matter what the caller sent.
    state.vision.config().api_key()?;

    let request: RecognizeRequest =
        serde_json::from_slice(body).map_err(|_| OcrError::InvalidJson)?;

    let image = request.image.unwrap_or_default();
    if image.is_empty() {
        return Err(OcrError::MissingImage);
    }

    let content = strip_data_url_prefix(&image);
    if content.is_empty() {
        return Err(OcrError::MissingImage);
    }

    let text = state.vision.recognize(content).await?;
    let text = text.trim();

    if text.is_empty() {
        log::info!("Vision API found no text");
        return Ok(with_cors(
            (
                StatusCode::OK,
                Json(NoTextResponse {
                    text: String::new(),
                    message: "no text detected".to_string(),
                }),
            )
                .into_response(),
        ));
    }

    log::info!("Recognized {} characters", text.chars().count());
    Ok(with_cors(
        (
            StatusCode::OK,
            Json(RecognizeResponse {
                text: text.to_string(),
                confidence: CONFIDENCE,
            }),
        )
            .into_response(),
    ))
}

fn preflight() -> Response {
    let mut response = StatusCode::OK.into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(
        header::ACCESS_CONTROL_MAX_AGE,
        HeaderValue::from_static("86400"),
    );
    response
}
