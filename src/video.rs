use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use tracing::debug;

/// Video container extensions the tool accepts.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "webm", "m4v"];

/// A video encoded for transport: base64 bytes plus the declared media type,
/// ready to be placed in an inline-data request part.
#[derive(Debug, Clone)]
pub struct VideoPayload {
    pub mime_type: String,
    pub data: String,
}

impl VideoPayload {
    /// Read a video file and encode it. The only failure mode is an
    /// unreadable file; encoding itself cannot fail.
    pub async fn load(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read video file: {}", path.display()))?;
        let mime_type = mime_type_for(path);
        debug!(
            "Encoded {} bytes of {} for transport",
            bytes.len(),
            mime_type
        );
        Ok(Self::from_bytes(&bytes, mime_type))
    }

    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }
}

/// Infer the media type from the file extension. Unknown extensions fall
/// back to `video/mp4`, which Gemini treats as a best-effort hint anyway.
pub fn mime_type_for(path: &Path) -> String {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        _ => "video/mp4",
    }
    .to_string()
}
