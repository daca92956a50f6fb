mod handlers;

use axum::extract::DefaultBodyLimit;
use axum::http::header;
use axum::http::HeaderValue;
use axum::response::Response;
use axum::routing::{any, get};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::vision::{VisionClient, VisionConfig};

/// Base64 payloads for notebook photos run large; cap request bodies well
/// above the provider's own image limit instead of axum's 2 MB default.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub vision: VisionClient,
}

impl AppState {
    pub fn new(config: VisionConfig) -> anyhow::Result<Self> {
        Ok(Self {
            vision: VisionClient::new(config)?,
        })
    }
}

/// The recognition endpoint is bound with `any` so the handler can answer
/// OPTIONS preflights and reject other methods with a JSON 405 itself.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/ping", get(|| async { "pong" }))
        .route("/health", get(|| async { "healthy" }))
        .route("/", any(handlers::recognize))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

pub(crate) fn with_cors(mut response: Response) -> Response {
    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    response
}
