use crate::llm::ModelConfig;
use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Upper bound on continuation cycles; each cycle re-uploads the whole
/// video, so a runaway loop burns quota fast.
pub const MAX_CONTINUATION_LIMIT: u32 = 64;

/// Configuration for the scene analyzer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote model settings
    pub model: ModelConfig,

    /// Analysis cycle settings
    pub analysis: AnalysisConfig,

    /// Output and logging settings
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Style directive: "original", a preset name, or free custom text
    pub style: String,

    /// Maximum continuation cycles after the initial one
    pub max_continuations: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for exported prompt files
    pub output_dir: PathBuf,

    /// Log level when RUST_LOG is unset
    pub log_level: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            style: "original".to_string(),
            max_continuations: 8,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./output"),
            log_level: "info".to_string(),
        }
    }
}

impl OutputConfig {
    /// Default tracing directives, used when `RUST_LOG` is unset.
    /// `verbose` forces debug regardless of the configured level.
    pub fn log_filter(&self, verbose: bool) -> String {
        let level = if verbose {
            "debug"
        } else {
            self.log_level.as_str()
        };
        format!("veo_scene_analyzer={level},scene_analyzer={level},warn")
    }
}

impl Config {
    /// Load configuration: first config file found wins, defaults
    /// otherwise; the `GEMINI_API_KEY` environment variable always
    /// overrides the file-sourced credential.
    pub fn load() -> Result<Self> {
        let config_paths = ["scene-analyzer.toml", "config/scene-analyzer.toml"];

        let mut config = Self::default();
        for path in &config_paths {
            if let Ok(config_str) = std::fs::read_to_string(path) {
                config = toml::from_str(&config_str)
                    .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;
                break;
            }
        }

        if let Ok(api_key) = std::env::var("GEMINI_API_KEY") {
            if !api_key.is_empty() {
                config.model.api_key = Some(api_key);
            }
        }

        Ok(config)
    }

    /// Validate configuration before a run.
    pub fn validate(&self) -> Result<()> {
        if self.model.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(anyhow!(
                "Gemini API key missing: set GEMINI_API_KEY, pass --api-key, or add it to scene-analyzer.toml"
            ));
        }

        if self.model.model.trim().is_empty() {
            return Err(anyhow!("Model identifier must not be empty"));
        }

        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(anyhow!("Temperature must be between 0.0 and 2.0"));
        }

        if self.analysis.max_continuations > MAX_CONTINUATION_LIMIT {
            return Err(anyhow!(
                "max_continuations must be at most {}",
                MAX_CONTINUATION_LIMIT
            ));
        }

        Ok(())
    }
}
