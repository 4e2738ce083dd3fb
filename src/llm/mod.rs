pub mod gemini;

use crate::video::VideoPayload;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Model identifiers known to handle video input well.
pub const KNOWN_MODELS: &[&str] = &[
    "gemini-3-flash-preview",
    "gemini-3-pro-preview",
    "gemini-2.5-flash-lite-latest",
];

/// Remote model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            // Low-variance decoding keeps the output framing stable
            temperature: 0.1,
            timeout_seconds: 300,
        }
    }
}

/// One multimodal generation request: the encoded video, the user
/// instruction, and the system instruction carried in the config block.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub system_instruction: String,
    pub user_text: String,
    pub video: VideoPayload,
}

/// Seam for the remote model call. Everything past this trait is opaque to
/// the core: a call either returns the full response text or fails with a
/// single transport/auth/quota error.
#[async_trait]
pub trait VideoModel: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<String>;
    fn model_id(&self) -> &str;
}

/// Create a model client from configuration.
pub fn create_model(config: &ModelConfig) -> Result<Box<dyn VideoModel>> {
    Ok(Box::new(gemini::GeminiProvider::new(config.clone())?))
}
