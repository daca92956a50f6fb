use serde::{Deserialize, Serialize};

use crate::error::OcrError;

use super::VisionConfig;

const LANGUAGE_CODES: [&str; 2] = ["ru", "en"];
const TEXT_DETECTION: &str = "TEXT_DETECTION";

// Wire format of the batchAnalyze endpoint. The provider mixes camelCase
// and snake_case field names, hence the renames.

#[derive(Serialize)]
struct BatchAnalyzeRequest {
    #[serde(rename = "folderId")]
    folder_id: String,
    analyze_specs: Vec<AnalyzeSpec>,
}

#[derive(Serialize)]
struct AnalyzeSpec {
    content: String,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct Feature {
    r#type: String,
    text_detection_config: TextDetectionConfig,
}

#[derive(Serialize)]
struct TextDetectionConfig {
    language_codes: Vec<String>,
}

impl Feature {
    fn text_detection() -> Self {
        Self {
            r#type: TEXT_DETECTION.to_string(),
            text_detection_config: TextDetectionConfig {
                language_codes: LANGUAGE_CODES.iter().map(|code| code.to_string()).collect(),
            },
        }
    }
}

// Every collection defaults to empty and every object is optional, so a
// response missing any level of the hierarchy deserializes instead of
// failing and simply contributes no text.

#[derive(Debug, Default, Deserialize)]
struct BatchAnalyzeResponse {
    #[serde(default)]
    results: Vec<AnalyzeResult>,
}

#[derive(Debug, Default, Deserialize)]
struct AnalyzeResult {
    #[serde(default)]
    results: Vec<FeatureResult>,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureResult {
    #[serde(rename = "textDetection")]
    text_detection: Option<TextAnnotation>,
}

#[derive(Debug, Default, Deserialize)]
struct TextAnnotation {
    #[serde(default)]
    pages: Vec<Page>,
}

#[derive(Debug, Default, Deserialize)]
struct Page {
    #[serde(default)]
    blocks: Vec<Block>,
}

#[derive(Debug, Default, Deserialize)]
struct Block {
    #[serde(default)]
    lines: Vec<Line>,
}

#[derive(Debug, Default, Deserialize)]
struct Line {
    #[serde(default)]
    words: Vec<Word>,
}

#[derive(Debug, Default, Deserialize)]
struct Word {
    #[serde(default)]
    text: String,
}

/// Keeps only the payload of a data-URL, e.g.
/// `data:image/png;base64,AAAA` becomes `AAAA`. Strings without a comma
/// pass through unchanged.
pub fn strip_data_url_prefix(image: &str) -> &str {
    match image.split_once(',') {
        Some((_, content)) => content,
        None => image,
    }
}

/// Words are joined with spaces per line, lines with newlines, across all
/// pages and blocks in document order.
fn collect_text(response: &BatchAnalyzeResponse) -> String {
    let annotation = response
        .results
        .first()
        .and_then(|result| result.results.first())
        .and_then(|feature| feature.text_detection.as_ref());

    let Some(annotation) = annotation else {
        return String::new();
    };

    let mut lines = Vec::new();
    for page in &annotation.pages {
        for block in &page.blocks {
            for line in &block.lines {
                let words: Vec<&str> = line.words.iter().map(|word| word.text.as_str()).collect();
                lines.push(words.join(" "));
            }
        }
    }
    lines.join("\n")
}

#[derive(Clone)]
pub struct VisionClient {
    http: reqwest::Client,
    config: VisionConfig,
}

impl VisionClient {
    pub fn new(config: VisionConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &VisionConfig {
        &self.config
    }

    /// One `batchAnalyze` round trip: submit the base64 image content with
    /// a text-detection feature, relay provider failures verbatim, and
    /// reduce the nested annotation to a single string.
    pub async fn recognize(&self, image_base64: &str) -> Result<String, OcrError> {
        let api_key = self.config.api_key()?;

        let payload = BatchAnalyzeRequest {
            folder_id: self.config.folder_id.clone(),
            analyze_specs: vec![AnalyzeSpec {
                content: image_base64.to_string(),
                features: vec![Feature::text_detection()],
            }],
        };

        log::debug!(
            "Sending {} bytes of base64 content to {}",
            image_base64.len(),
            self.config.endpoint
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .header("Authorization", format!("Api-Key {}", api_key))
            .json(&payload)
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        let body = response.text().await.map_err(request_error)?;

        if status != reqwest::StatusCode::OK {
            log::error!("Vision API returned {}: {}", status, body);
            return Err(OcrError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: BatchAnalyzeResponse = serde_json::from_str(&body)
            .map_err(|err| anyhow::anyhow!("unreadable Vision API response: {}", err))?;

        Ok(collect_text(&parsed))
    }
}

fn request_error(err: reqwest::Error) -> OcrError {
    if err.is_timeout() {
        OcrError::Timeout
    } else {
        OcrError::Internal(err.into())
    }
}
