//! Gemini (Google) composite provider.

use crate::composite::provider::{CompositeProvider, ProviderKind};
use crate::composite::types::{CompositeRequest, CompositeResult, UploadedImage};
use crate::error::{CompixError, Result};
use crate::prompt;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";

/// Builder for [`GeminiCompositor`].
#[derive(Debug, Clone, Default)]
pub struct GeminiCompositorBuilder {
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
}

impl GeminiCompositorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `GOOGLE_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the model identifier. Defaults to `gemini-2.5-flash-image-preview`.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Overrides the API endpoint, mainly for tests against a local server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the provider, resolving the API key. The credential is checked
    /// here so a missing key fails before any request can be attempted.
    pub fn build(self) -> Result<GeminiCompositor> {
        let api_key = match self.api_key {
            Some(key) => key,
            None => std::env::var("GOOGLE_API_KEY").unwrap_or_default(),
        };
        if api_key.trim().is_empty() {
            return Err(CompixError::Config(
                "GOOGLE_API_KEY not set and no API key provided".into(),
            ));
        }

        Ok(GeminiCompositor {
            client: reqwest::Client::new(),
            api_key,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

/// Gemini-backed photo compositor.
pub struct GeminiCompositor {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiCompositor {
    /// Creates a new `GeminiCompositorBuilder`.
    pub fn builder() -> GeminiCompositorBuilder {
        GeminiCompositorBuilder::new()
    }

    async fn generate_impl(&self, request: &CompositeRequest) -> Result<CompositeResult> {
        let prompt = prompt::compose(&request.notes);
        let body = GeminiRequest::from_composite_request(request, &prompt);

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model,
        );

        tracing::debug!(model = %self.model, "sending composite request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "composite request failed");
            return Err(CompixError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let gemini_response: GeminiResponse = response.json().await?;
        extract_result(gemini_response, prompt)
    }
}

#[async_trait]
impl CompositeProvider for GeminiCompositor {
    async fn generate_composite(&self, request: &CompositeRequest) -> Result<CompositeResult> {
        self.generate_impl(request)
            .await
            .map_err(CompixError::into_user_facing)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    async fn health_check(&self) -> Result<()> {
        let url = format!("{}/v1beta/models/{}", self.base_url, self.model);

        let response = self
            .client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await?;

        match response.status().as_u16() {
            401 | 403 => Err(CompixError::Config("invalid API key".into())),
            s if !(200..300).contains(&s) => Err(CompixError::Api {
                status: s,
                message: "Health check failed".into(),
            }),
            _ => Ok(()),
        }
    }
}

/// Scans the response for the merged image. Only the first candidate is
/// consumed; among its parts, the last inline-image part wins.
fn extract_result(response: GeminiResponse, prompt: String) -> Result<CompositeResult> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(CompixError::NoImage)?;

    let content = candidate.content.ok_or(CompixError::NoImage)?;

    let inline = content
        .parts
        .into_iter()
        .rev()
        .find_map(|part| match part {
            ResponsePart::InlineImage { inline_data } => Some(inline_data),
            _ => None,
        })
        .ok_or(CompixError::NoImage)?;

    Ok(CompositeResult {
        image: format!("data:{};base64,{}", inline.mime_type, inline.data),
        prompt_used: prompt,
    })
}

// Request/Response types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: GeminiContent,
    generation_config: GeminiConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<RequestPart>,
}

/// A part in a Gemini request - text or inline image data.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    InlineImage {
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiConfig {
    response_modalities: Vec<String>,
}

impl GeminiRequest {
    /// Builds the three ordered parts of a composite request. The text goes
    /// first so the model reads the following images as base then guest.
    fn from_composite_request(req: &CompositeRequest, prompt: &str) -> Self {
        let parts = vec![
            RequestPart::Text {
                text: prompt.to_string(),
            },
            inline_part(&req.base),
            inline_part(&req.guest),
        ];

        Self {
            contents: GeminiContent { parts },
            generation_config: GeminiConfig {
                response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
            },
        }
    }
}

fn inline_part(image: &UploadedImage) -> RequestPart {
    RequestPart::InlineImage {
        inline_data: InlineData {
            mime_type: image.mime_type().as_str().to_string(),
            data: image.base64_payload().to_string(),
        },
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContentResponse>,
}

#[derive(Debug, Deserialize)]
struct GeminiContentResponse {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

/// A part in a Gemini response, as a tagged variant rather than a bag of
/// optional fields.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponsePart {
    #[serde(rename_all = "camelCase")]
    InlineImage {
        inline_data: InlineData,
    },
    Text {
        #[allow(dead_code)]
        text: String,
    },
    Unknown(serde_json::Value),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> CompositeRequest {
        CompositeRequest::new(
            UploadedImage::new("data:image/jpeg;base64,YmFzZQ==", "couple.jpg"),
            UploadedImage::new("data:image/png;base64,Z3Vlc3Q=", "guest.png"),
            "",
        )
    }

    #[test]
    fn test_builder_with_explicit_key() {
        let provider = GeminiCompositorBuilder::new().api_key("test-key").build();
        assert!(provider.is_ok());
    }

    #[test]
    fn test_builder_rejects_blank_key() {
        let result = GeminiCompositorBuilder::new().api_key("   ").build();
        assert!(matches!(result, Err(CompixError::Config(_))));
    }

    #[test]
    fn test_builder_defaults() {
        let provider = GeminiCompositorBuilder::new()
            .api_key("test-key")
            .build()
            .unwrap();
        assert_eq!(provider.model, DEFAULT_MODEL);
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_request_parts_ordered_text_base_guest() {
        let req = sample_request();
        let prompt = prompt::compose(&req.notes);
        let body = GeminiRequest::from_composite_request(&req, &prompt);

        let parts = &body.contents.parts;
        assert_eq!(parts.len(), 3);
        assert!(matches!(parts[0], RequestPart::Text { .. }));

        match &parts[1] {
            RequestPart::InlineImage { inline_data } => {
                assert_eq!(inline_data.mime_type, "image/jpeg");
                assert_eq!(inline_data.data, "YmFzZQ==");
            }
            other => panic!("expected base image part, got {other:?}"),
        }
        match &parts[2] {
            RequestPart::InlineImage { inline_data } => {
                assert_eq!(inline_data.mime_type, "image/png");
                assert_eq!(inline_data.data, "Z3Vlc3Q=");
            }
            other => panic!("expected guest image part, got {other:?}"),
        }
    }

    #[test]
    fn test_request_declares_both_modalities() {
        let req = sample_request();
        let body = GeminiRequest::from_composite_request(&req, "p");
        assert_eq!(
            body.generation_config.response_modalities,
            vec!["IMAGE", "TEXT"]
        );
    }

    #[test]
    fn test_request_serialization_uses_camel_case() {
        let req = sample_request();
        let body = GeminiRequest::from_composite_request(&req, "p");
        let json = serde_json::to_value(&body).unwrap();

        assert!(json.get("generationConfig").is_some());
        assert!(json.get("generation_config").is_none());
        assert!(
            json["contents"]["parts"][1].get("inlineData").is_some(),
            "inline parts must serialize camelCase"
        );
        assert_eq!(
            json["generationConfig"]["responseModalities"],
            serde_json::json!(["IMAGE", "TEXT"])
        );
    }

    #[test]
    fn test_extract_result_no_candidates() {
        let response: GeminiResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        let result = extract_result(response, "p".into());
        assert!(matches!(result, Err(CompixError::NoImage)));
    }

    #[test]
    fn test_extract_result_text_only_parts() {
        let json = r#"{
            "candidates": [{
                "content": { "parts": [{ "text": "I cannot do that." }] }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let result = extract_result(response, "p".into());
        assert!(matches!(result, Err(CompixError::NoImage)));
    }

    #[test]
    fn test_extract_result_last_image_part_wins() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "Zmlyc3Q=" } },
                        { "text": "here you go" },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "c2Vjb25k" } }
                    ]
                }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let result = extract_result(response, "p".into()).unwrap();
        assert_eq!(result.image, "data:image/jpeg;base64,c2Vjb25k");
    }

    #[test]
    fn test_extract_result_echoes_prompt() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [{ "inlineData": { "mimeType": "image/png", "data": "aW1n" } }]
                }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let prompt = prompt::compose("Make it sunset");
        let result = extract_result(response, prompt.clone()).unwrap();
        assert_eq!(result.prompt_used, prompt);
    }

    #[test]
    fn test_response_tolerates_unknown_part_shapes() {
        let json = r#"{
            "candidates": [{
                "content": {
                    "parts": [
                        { "functionCall": { "name": "noop" } },
                        { "inlineData": { "mimeType": "image/png", "data": "aW1n" } }
                    ]
                }
            }]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        let result = extract_result(response, "p".into()).unwrap();
        assert_eq!(result.image, "data:image/png;base64,aW1n");
    }

    #[test]
    fn test_response_missing_content() {
        let json = r#"{"candidates": [{ "finishReason": "SAFETY" }]}"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            extract_result(response, "p".into()),
            Err(CompixError::NoImage)
        ));
    }
}
