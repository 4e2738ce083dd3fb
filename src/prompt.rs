use crate::schema;

/// Preset style catalog offered by the CLI. Free text is equally valid; the
/// presets only exist so common looks are one flag away.
pub const PRESET_STYLES: &[&str] = &[
    "Synthwave, neon sunset, 80s retro",
    "Steampunk, victorian machinery",
    "Dark fantasy, dramatic lighting",
    "Kawaii chibi cute style",
    "Hyper-realistic portrait",
    "Low poly 3D game style",
    "Pixel art 16-bit retro game",
    "Tim Burton gothic quirky style",
    "Wes Anderson symmetric pastel",
    "Noir film, black & white, dramatic",
    "Horror dark moody atmosphere",
    "Sci-fi futuristic spaceship",
    "Disney classic 2D animation",
];

/// Style directive driving both instruction blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Style {
    /// Describe the source video's own intrinsic visual style instead of
    /// imposing one.
    Original,
    /// A fixed catalog entry.
    Preset(String),
    /// Arbitrary user-provided style text.
    Custom(String),
}

impl Style {
    /// Resolve a CLI/config style string: "original" selects the intrinsic
    /// style, a known preset name selects that preset, anything else is
    /// custom text.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case("original") {
            return Style::Original;
        }
        if let Some(preset) = PRESET_STYLES
            .iter()
            .find(|p| p.eq_ignore_ascii_case(trimmed))
        {
            return Style::Preset((*preset).to_string());
        }
        Style::Custom(trimmed.to_string())
    }

    /// Human-readable descriptor, used in logs and instruction text.
    pub fn descriptor(&self) -> &str {
        match self {
            Style::Original => "Original style (as seen in the source video)",
            Style::Preset(text) | Style::Custom(text) => text,
        }
    }

    fn is_original(&self) -> bool {
        matches!(self, Style::Original)
    }
}

/// System-level instruction: role, the fixed 8-second segmentation rule,
/// identifier locking, and the strict one-object-per-line output framing.
pub fn system_instruction(style: &Style) -> String {
    let style_description = if style.is_original() {
        "described in the exact art style, lighting and materials extracted directly from the source video".to_string()
    } else {
        format!("rendered and described in this style: \"{}\"", style.descriptor())
    };

    format!(
        r#"Role: you are a video analysis expert and prompt engineer for an AI video generation model (Veo 3). Your task is to watch the input video, split it into short segments (each exactly 8 seconds) and produce precise technical JSON descriptors.

CRITICAL STYLE REQUIREMENT:
- The entire video must be analyzed and {style_description}.
- The "visual_style" field of every JSON object must open by naming this style and then expand the matching technical detail.

Process:
1. Segmentation: split the video into consecutive segments, each exactly 8 seconds long.
2. Analysis: observe every frame closely. Describe only what is seen and heard, through the lens of the requested style.
3. Consistency: assign fixed IDs to characters (CHAR_1, CHAR_2) and backgrounds (BACKGROUND_1) and reuse them across all segments.
4. Output framing:
   - EACH SCENE MUST BE EXACTLY ONE COMPLETE JSON OBJECT ON A SINGLE LINE.
   - SEPARATE SCENES WITH ONE BLANK LINE.
   - NOTHING ELSE MAY APPEAR ON A JSON LINE.
"#
    )
}

/// User-level instruction: the resume directive, the style action, and the
/// schema template rendered verbatim so the model's output matches what the
/// extractor expects.
pub fn user_instruction(style: &Style, resume_offset: u64) -> String {
    let start_directive = if resume_offset > 0 {
        format!(
            "Continue the analysis from Scene {}. Skip every earlier scene.",
            resume_offset + 1
        )
    } else {
        "Start the analysis from Scene 1 (0s).".to_string()
    };

    let style_action = if style.is_original() {
        "analyze the video and keep its original visual style".to_string()
    } else {
        format!(
            "re-render the content of this video in the style \"{}\"",
            style.descriptor()
        )
    };

    format!(
        "{start_directive} Then {style_action}. Output JSON following the structure below (MAKE SURE EACH JSON OBJECT IS ON A SINGLE LINE).\n\nRequired JSON template (ONE LINE, FIELD NAMES VERBATIM):\n{template}",
        template = schema::scene_template()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_original_keyword() {
        assert_eq!(Style::parse("original"), Style::Original);
        assert_eq!(Style::parse("  Original "), Style::Original);
    }

    #[test]
    fn test_parse_preset_and_custom() {
        assert_eq!(
            Style::parse("Noir film, black & white, dramatic"),
            Style::Preset("Noir film, black & white, dramatic".to_string())
        );
        assert_eq!(
            Style::parse("claymation stop motion"),
            Style::Custom("claymation stop motion".to_string())
        );
    }

    #[test]
    fn test_resume_directive_references_next_scene() {
        // Resuming after scene 5 must ask the model for scene 6 verbatim.
        let text = user_instruction(&Style::Original, 5);
        assert!(text.contains("Continue the analysis from Scene 6."));
        assert!(text.contains("Skip every earlier scene."));
    }

    #[test]
    fn test_zero_offset_starts_at_scene_one() {
        let text = user_instruction(&Style::Original, 0);
        assert!(text.contains("Start the analysis from Scene 1 (0s)."));
        assert!(!text.contains("Continue the analysis"));
    }

    #[test]
    fn test_user_instruction_embeds_schema_template() {
        let text = user_instruction(&Style::Custom("wool felt puppets".to_string()), 0);
        assert!(text.contains(schema::scene_template()));
        assert!(text.contains("wool felt puppets"));
    }

    #[test]
    fn test_system_instruction_framing_rules() {
        let text = system_instruction(&Style::Preset(PRESET_STYLES[0].to_string()));
        assert!(text.contains("exactly 8 seconds"));
        assert!(text.contains("CHAR_1"));
        assert!(text.contains("BACKGROUND_1"));
        assert!(text.contains("ONE COMPLETE JSON OBJECT ON A SINGLE LINE"));
        assert!(text.contains(PRESET_STYLES[0]));
    }

    #[test]
    fn test_original_style_keeps_source_look() {
        let system = system_instruction(&Style::Original);
        assert!(system.contains("extracted directly from the source video"));
        let user = user_instruction(&Style::Original, 0);
        assert!(user.contains("keep its original visual style"));
    }
}
