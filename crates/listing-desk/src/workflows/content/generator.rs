use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::runtime::Runtime;

use super::catalog::ServiceTopic;

/// Generated marketing copy for one service page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCopy {
    pub introduction: String,
    pub benefits: Vec<String>,
    pub market_value: String,
    pub why_us: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("content backend failed: {0}")]
    Backend(String),
    #[error("content backend returned an unusable payload: {0}")]
    Malformed(String),
    #[error("content runtime unavailable: {0}")]
    Runtime(String),
}

/// Gateway to the generative content backend. Callers must treat failures
/// as recoverable and fall back to placeholder content.
pub trait ContentGenerator: Send + Sync {
    fn generate_copy(&self, topic: &ServiceTopic) -> Result<ServiceCopy, ContentError>;
    fn generate_preview_image(&self, topic: &ServiceTopic) -> Result<String, ContentError>;
}

const GENERATIVE_LANGUAGE_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models";
const IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// Thin wrapper around the Gemini HTTP API allowing synchronous workflow
/// code to request copy and preview images without exposing async details.
pub struct GeminiContentClient {
    http: reqwest::Client,
    runtime: Runtime,
    api_key: String,
    model: String,
}

impl GeminiContentClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ContentError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ContentError::Runtime(err.to_string()))?;
        let runtime = Runtime::new().map_err(|err| ContentError::Runtime(err.to_string()))?;
        Ok(Self {
            http,
            runtime,
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    fn generate(
        &self,
        model: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, ContentError> {
        let url = format!(
            "{GENERATIVE_LANGUAGE_ENDPOINT}/{model}:generateContent?key={}",
            self.api_key
        );

        self.runtime.block_on(async {
            let response = self
                .http
                .post(url)
                .json(&body)
                .send()
                .await
                .map_err(|err| ContentError::Backend(err.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                return Err(ContentError::Backend(format!(
                    "backend responded with status {status}"
                )));
            }

            response
                .json::<serde_json::Value>()
                .await
                .map_err(|err| ContentError::Malformed(err.to_string()))
        })
    }
}

impl std::fmt::Debug for GeminiContentClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiContentClient")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl ContentGenerator for GeminiContentClient {
    fn generate_copy(&self, topic: &ServiceTopic) -> Result<ServiceCopy, ContentError> {
        let prompt = copy_prompt(topic);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        let payload = self.generate(&self.model, body)?;
        let text = first_text_part(&payload).ok_or_else(|| {
            ContentError::Malformed("response carried no text candidate".to_string())
        })?;

        serde_json::from_str(strip_code_fences(text))
            .map_err(|err| ContentError::Malformed(err.to_string()))
    }

    fn generate_preview_image(&self, topic: &ServiceTopic) -> Result<String, ContentError> {
        let prompt = image_prompt(topic);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "responseModalities": ["TEXT", "IMAGE"] },
        });

        let payload = self.generate(IMAGE_MODEL, body)?;
        first_inline_image(&payload).ok_or_else(|| {
            ContentError::Malformed("response carried no image candidate".to_string())
        })
    }
}

fn copy_prompt(topic: &ServiceTopic) -> String {
    format!(
        "You are an expert marketing copywriter for a digital agency. \
         Generate page content for the service '{title}' ({summary}). \
         Respond with a JSON object holding four keys: 'introduction' \
         (2-3 engaging sentences), 'benefits' (3 to 5 tangible benefits), \
         'market_value' (why the service matters in today's market), and \
         'why_us' (why this agency is the right choice). The tone is \
         professional, confident, and persuasive.",
        title = topic.title,
        summary = topic.summary,
    )
}

fn image_prompt(topic: &ServiceTopic) -> String {
    format!(
        "Generate a visually striking, abstract 3D illustration that \
         conceptually represents '{}'. Dynamic, energetic, sophisticated. \
         Resolution: 800x450.",
        topic.title,
    )
}

fn first_text_part(payload: &serde_json::Value) -> Option<&str> {
    payload
        .pointer("/candidates/0/content/parts")?
        .as_array()?
        .iter()
        .find_map(|part| part.get("text").and_then(serde_json::Value::as_str))
}

fn first_inline_image(payload: &serde_json::Value) -> Option<String> {
    let parts = payload.pointer("/candidates/0/content/parts")?.as_array()?;
    parts.iter().find_map(|part| {
        let inline = part.get("inlineData").or_else(|| part.get("inline_data"))?;
        let mime_type = inline.get("mimeType").and_then(serde_json::Value::as_str)?;
        let data = inline.get("data").and_then(serde_json::Value::as_str)?;
        Some(format!("data:{mime_type};base64,{data}"))
    })
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}
