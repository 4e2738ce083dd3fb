//! Veo Scene Analyzer
//!
//! Sends a video to Gemini with a style directive and recovers the reply as
//! an ordered sequence of single-line JSON scene descriptors for the Veo 3
//! video model, with support for resuming generation from the last
//! recovered scene.

pub mod analyzer;
pub mod config;
pub mod extract;
pub mod llm;
pub mod prompt;
pub mod scene;
pub mod schema;
pub mod session;
pub mod video;

// Re-export main types for easy access
pub use crate::analyzer::VideoAnalyzer;
pub use crate::config::Config;
pub use crate::extract::{analyze_text, extract_scenes};
pub use crate::llm::{GenerateRequest, ModelConfig, VideoModel};
pub use crate::prompt::Style;
pub use crate::scene::{AnalysisResult, SceneRecord};
pub use crate::session::{Continuation, SceneSession};
pub use crate::video::VideoPayload;
