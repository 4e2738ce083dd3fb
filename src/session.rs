use crate::scene::SceneRecord;

/// Outcome of folding one analysis cycle into the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// The cycle produced scenes; this many were appended.
    Appended(usize),
    /// The cycle produced nothing. Terminal: the model has no further
    /// scenes to offer. Not an error.
    Exhausted,
}

/// Caller-held accumulation state across analysis cycles.
///
/// The core is stateless per call; the growing scene list lives here, owned
/// by whoever drives the cycles. Batches are appended in arrival order and
/// records are never removed. Scenes with repeated `scene_id`s pass through
/// untouched (the model is trusted not to repeat itself).
#[derive(Debug, Clone, Default)]
pub struct SceneSession {
    scenes: Vec<SceneRecord>,
}

impl SceneSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scenes(&self) -> &[SceneRecord] {
        &self.scenes
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Resume offset for the next cycle: the last scene's `scene_id` parsed
    /// as an integer, falling back to the accumulated count when the model
    /// emitted something non-numeric. Zero when the session is empty.
    ///
    /// Parsing is lenient, taking the leading digit run, so ids like "5."
    /// or "5a" still resume from 5 rather than hitting the fallback.
    pub fn resume_offset(&self) -> u64 {
        let last = match self.scenes.last() {
            Some(record) => record,
            None => return 0,
        };
        let id = last.scene_id();
        let digits: &str = {
            let trimmed = id.trim();
            let end = trimmed
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(trimmed.len());
            &trimmed[..end]
        };
        digits.parse::<u64>().unwrap_or(self.scenes.len() as u64)
    }

    /// Append one cycle's batch, preserving order. An empty batch is the
    /// terminal "no more scenes" signal.
    pub fn absorb(&mut self, batch: Vec<SceneRecord>) -> Continuation {
        if batch.is_empty() {
            return Continuation::Exhausted;
        }
        let appended = batch.len();
        self.scenes.extend(batch);
        Continuation::Appended(appended)
    }

    /// The export artifact: each record compactly re-stringified, records
    /// separated by one blank line. Used both for the downloadable file and
    /// for printing to stdout.
    pub fn export_text(&self) -> String {
        self.scenes
            .iter()
            .map(|s| s.to_compact_json())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
