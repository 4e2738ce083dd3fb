use super::{GenerateRequest, ModelConfig, VideoModel};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Gemini `generateContent` client.
pub struct GeminiProvider {
    config: ModelConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(rename = "systemInstruction")]
    system_instruction: GeminiContent,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(
        rename = "inlineData",
        skip_serializing_if = "Option::is_none",
        default
    )]
    inline_data: Option<GeminiInlineData>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiInlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

impl GeminiProvider {
    pub fn new(config: ModelConfig) -> Result<Self> {
        if config.api_key.is_none() {
            return Err(anyhow!("Gemini API key required"));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { config, client })
    }

    fn build_body(&self, request: &GenerateRequest) -> GeminiRequest {
        GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![
                    GeminiPart {
                        inline_data: Some(GeminiInlineData {
                            mime_type: request.video.mime_type.clone(),
                            data: request.video.data.clone(),
                        }),
                        text: None,
                    },
                    GeminiPart {
                        inline_data: None,
                        text: Some(request.user_text.clone()),
                    },
                ],
            }],
            system_instruction: GeminiContent {
                parts: vec![GeminiPart {
                    inline_data: None,
                    text: Some(request.system_instruction.clone()),
                }],
            },
            generation_config: GeminiGenerationConfig {
                temperature: self.config.temperature,
            },
        }
    }
}

#[async_trait]
impl VideoModel for GeminiProvider {
    async fn generate(&self, request: GenerateRequest) -> Result<String> {
        let api_key = self
            .config
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow!("Gemini API key not configured"))?;

        let body = self.build_body(&request);

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.config.model, api_key
        );

        debug!(
            "Sending {} chars of inline video data to Gemini model {}",
            request.video.data.len(),
            self.config.model
        );

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("Gemini API error {}: {}", status, text));
        }

        let gemini_response: GeminiResponse = response.json().await?;

        let text = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.parts.iter().find_map(|p| p.text.as_ref()))
            .cloned()
            .ok_or_else(|| anyhow!("No response from Gemini"))?;

        Ok(text)
    }

    fn model_id(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::VideoPayload;

    fn provider() -> GeminiProvider {
        let config = ModelConfig {
            api_key: Some("test-key".to_string()),
            ..ModelConfig::default()
        };
        GeminiProvider::new(config).unwrap()
    }

    #[test]
    fn test_new_requires_api_key() {
        assert!(GeminiProvider::new(ModelConfig::default()).is_err());
    }

    #[test]
    fn test_request_body_wire_shape() {
        let request = GenerateRequest {
            system_instruction: "system text".to_string(),
            user_text: "user text".to_string(),
            video: VideoPayload::from_bytes(b"abc", "video/mp4"),
        };
        let body = serde_json::to_value(provider().build_body(&request)).unwrap();

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "video/mp4");
        assert_eq!(parts[0]["inlineData"]["data"], "YWJj");
        assert_eq!(parts[1]["text"], "user text");
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            "system text"
        );
        let temperature = body["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_inline_data_part_omits_text_field() {
        let request = GenerateRequest {
            system_instruction: String::new(),
            user_text: String::new(),
            video: VideoPayload::from_bytes(b"", "video/webm"),
        };
        let body = serde_json::to_value(provider().build_body(&request)).unwrap();
        assert!(body["contents"][0]["parts"][0].get("text").is_none());
    }
}
