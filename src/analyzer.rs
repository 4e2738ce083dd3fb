use crate::extract;
use crate::llm::{create_model, GenerateRequest, ModelConfig, VideoModel};
use crate::prompt::{self, Style};
use crate::scene::AnalysisResult;
use crate::video::VideoPayload;
use anyhow::Result;
use tracing::{debug, info};

/// Drives one Composer -> remote call -> Extractor cycle.
///
/// Each cycle is independent: the analyzer holds no scene state, only the
/// model client. Only remote-call failures cross this boundary as errors;
/// parse noise is absorbed by the extractor.
pub struct VideoAnalyzer {
    model: Box<dyn VideoModel>,
}

impl VideoAnalyzer {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        Ok(Self {
            model: create_model(config)?,
        })
    }

    /// Build an analyzer around an existing model client (used by tests to
    /// inject a scripted model).
    pub fn with_model(model: Box<dyn VideoModel>) -> Self {
        Self { model }
    }

    /// Run one analysis cycle against the video at the given resume offset.
    pub async fn analyze(
        &self,
        video: &VideoPayload,
        style: &Style,
        resume_offset: u64,
    ) -> Result<AnalysisResult> {
        let request = GenerateRequest {
            system_instruction: prompt::system_instruction(style),
            user_text: prompt::user_instruction(style, resume_offset),
            video: video.clone(),
        };

        debug!(
            "Requesting scene analysis from {} (resume offset {})",
            self.model.model_id(),
            resume_offset
        );

        let raw = self.model.generate(request).await?;
        let result = extract::analyze_text(&raw);

        info!(
            "Recovered {} scene(s) from {} chars of model output",
            result.scenes.len(),
            result.raw.len()
        );

        Ok(result)
    }
}
