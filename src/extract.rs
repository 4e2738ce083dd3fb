use crate::scene::{AnalysisResult, SceneRecord};
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::debug;

/// Greedy brace-delimited object pattern used for salvage: first `{` to the
/// last `}` on the line.
fn object_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{.*\}").unwrap())
}

/// Recover scene records from raw model output, in line order.
///
/// The model is instructed to emit one complete JSON object per line, but
/// real output carries noise: stray commentary, truncated tails, markdown
/// fences. Partial recovery beats all-or-nothing failure here, because the
/// continuation workflow only needs *some* forward progress, so every
/// irregularity is absorbed silently:
///
/// 1. a trimmed line is a candidate only if it starts with `{` and ends
///    with `}`;
/// 2. candidates get one strict JSON parse;
/// 3. on failure, one salvage pass looks for the longest embedded
///    brace-delimited substring that parses (longest span first, retreating
///    to earlier closing braces);
/// 4. whatever parses is kept only if it carries a truthy `scene_id`.
///
/// Multiple objects concatenated on one line are never split into separate
/// records; the first successful parse attempt wins.
pub fn extract_scenes(raw: &str) -> Vec<SceneRecord> {
    let mut scenes = Vec::new();

    for line in raw.lines() {
        let trimmed = line.trim();
        if !(trimmed.starts_with('{') && trimmed.ends_with('}')) {
            continue;
        }

        let value = match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => Some(value),
            Err(err) => {
                debug!("Strict parse failed ({}), attempting salvage", err);
                salvage_object(trimmed)
            }
        };

        if let Some(record) = value.and_then(SceneRecord::from_value) {
            scenes.push(record);
        }
    }

    scenes
}

/// Extract scenes and pair them with the untouched raw text.
pub fn analyze_text(raw: &str) -> AnalysisResult {
    let scenes = extract_scenes(raw);
    AnalysisResult {
        raw: raw.to_string(),
        scenes,
    }
}

/// Best-effort recovery of an embedded JSON object from a line that failed
/// the strict parse. Starts from the greedy `{...}` match and shortens the
/// span one closing brace at a time until something parses.
fn salvage_object(trimmed: &str) -> Option<Value> {
    let span = object_pattern().find(trimmed)?.as_str();

    let mut end = span.len();
    loop {
        if let Ok(value) = serde_json::from_str::<Value>(&span[..end]) {
            debug!("Salvaged embedded object ({} of {} chars)", end, span.len());
            return Some(value);
        }
        match span[..end - 1].rfind('}') {
            Some(pos) => end = pos + 1,
            None => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_scenes_with_noise_between() {
        let raw = "{\"scene_id\":\"1\",\"duration_sec\":\"8\"}\n\nnot json\n\n{\"scene_id\":\"2\",\"duration_sec\":\"8\"}";
        let scenes = extract_scenes(raw);
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].scene_id(), "1");
        assert_eq!(scenes[1].scene_id(), "2");
    }

    #[test]
    fn test_order_preserved() {
        let raw = "{\"scene_id\":\"3\"}\n{\"scene_id\":\"1\"}\n{\"scene_id\":\"2\"}";
        let ids: Vec<String> = extract_scenes(raw).iter().map(|s| s.scene_id()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_missing_scene_id_is_skipped() {
        assert!(extract_scenes("{\"duration_sec\":\"8\"}").is_empty());
    }

    #[test]
    fn test_empty_scene_id_is_skipped() {
        assert!(extract_scenes("{\"scene_id\":\"\",\"duration_sec\":\"8\"}").is_empty());
    }

    #[test]
    fn test_non_candidate_line_never_contributes() {
        // Valid JSON embedded in prose, but the line fails the candidate
        // gate, so it must be excluded entirely.
        let raw = "garbage-prefix {\"scene_id\":\"3\",\"duration_sec\":\"8\"} trailing-garbage";
        assert!(extract_scenes(raw).is_empty());
    }

    #[test]
    fn test_salvage_recovers_embedded_object() {
        // Candidate line (starts `{`, ends `}`) with a glitched tail; the
        // embedded object must be recovered.
        let raw = "{\"scene_id\":\"3\",\"duration_sec\":\"8\"} trailing,}";
        let scenes = extract_scenes(raw);
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].scene_id(), "3");
    }

    #[test]
    fn test_concatenated_objects_are_not_split() {
        // Two objects glued on one line: the first successful parse wins
        // and no attempt is made to split them into separate records.
        let raw = "{\"scene_id\":\"1\"}{\"scene_id\":\"2\"}";
        let scenes = extract_scenes(raw);
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].scene_id(), "1");
    }

    #[test]
    fn test_blank_and_prose_lines_skipped() {
        let raw = "\n\nHere are your scenes:\n\n{\"scene_id\":\"1\"}\n\nThat's all!\n";
        assert_eq!(extract_scenes(raw).len(), 1);
    }

    #[test]
    fn test_idempotent_reparse() {
        let raw = "{\"scene_id\":\"1\"}\nnoise\n{\"scene_id\":\"2\"} oops}";
        let first = extract_scenes(raw);
        let second = extract_scenes(raw);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_yields_empty_list() {
        assert!(extract_scenes("").is_empty());
        assert!(extract_scenes("no structured content at all").is_empty());
    }

    #[test]
    fn test_analyze_text_keeps_raw() {
        let raw = "prose\n{\"scene_id\":\"1\"}";
        let result = analyze_text(raw);
        assert_eq!(result.raw, raw);
        assert_eq!(result.scenes.len(), 1);
    }

    #[test]
    fn test_truncated_object_is_skipped() {
        // Truncation mid-object fails the candidate gate (no closing brace).
        assert!(extract_scenes("{\"scene_id\":\"4\",\"duration_se").is_empty());
    }
}
