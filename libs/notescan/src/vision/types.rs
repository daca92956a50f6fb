use std::time::Duration;

use crate::error::OcrError;

pub const DEFAULT_ENDPOINT: &str = "https://vision.api.cloud.yandex.net/vision/v1/batchAnalyze";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the Yandex Vision OCR API.
///
/// Built once at startup from the environment and handed to the server
/// state or the CLI; handlers never read the environment themselves.
/// A missing API key is not fatal here, it is reported per request.
#[derive(Clone, Debug)]
pub struct VisionConfig {
    pub api_key: Option<String>,
    pub folder_id: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl VisionConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("YANDEX_CLOUD_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            folder_id: std::env::var("YANDEX_FOLDER_ID").unwrap_or_default(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn api_key(&self) -> Result<&str, OcrError> {
        self.api_key.as_deref().ok_or(OcrError::MissingApiKey)
    }
}
