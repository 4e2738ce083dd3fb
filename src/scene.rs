use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One scene descriptor recovered from the model's output.
///
/// The record keeps the parsed JSON object as-is rather than forcing it
/// through the typed schema: the model is not guaranteed to fill every
/// field, and a partially-filled scene is still a usable prompt. The only
/// structural guarantee is a truthy `scene_id` (checked at construction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SceneRecord(Map<String, Value>);

impl SceneRecord {
    /// Wrap a parsed JSON value, gated on it being an object with a truthy
    /// `scene_id` field. Anything else is not a scene.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) if map.get("scene_id").map_or(false, is_truthy) => Some(Self(map)),
            _ => None,
        }
    }

    /// The scene's identifier as emitted by the model. Usually a
    /// string-encoded integer, but the model is not held to that.
    pub fn scene_id(&self) -> String {
        match self.0.get("scene_id") {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Compact single-line re-serialization, the form the export artifact
    /// uses.
    pub fn to_compact_json(&self) -> String {
        serde_json::to_string(&self.0).unwrap_or_default()
    }
}

/// JavaScript-style truthiness, matching how the original gate treated
/// `scene_id`: empty string, 0, false and null are all falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// The outcome of one analysis cycle: the untouched raw response text
/// (kept for diagnostics) paired with the scenes recovered from it.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub raw: String,
    pub scenes: Vec<SceneRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_requires_truthy_scene_id() {
        assert!(SceneRecord::from_value(json!({"scene_id": "1"})).is_some());
        assert!(SceneRecord::from_value(json!({"scene_id": ""})).is_none());
        assert!(SceneRecord::from_value(json!({"scene_id": null})).is_none());
        assert!(SceneRecord::from_value(json!({"scene_id": 0})).is_none());
        assert!(SceneRecord::from_value(json!({"duration_sec": "8"})).is_none());
        assert!(SceneRecord::from_value(json!("not an object")).is_none());
    }

    #[test]
    fn test_scene_id_accessor() {
        let record = SceneRecord::from_value(json!({"scene_id": "7"})).unwrap();
        assert_eq!(record.scene_id(), "7");

        let numeric = SceneRecord::from_value(json!({"scene_id": 3})).unwrap();
        assert_eq!(numeric.scene_id(), "3");
    }

    #[test]
    fn test_compact_json_round_trip() {
        let value = json!({"scene_id": "1", "duration_sec": "8", "visual_style": "noir"});
        let record = SceneRecord::from_value(value.clone()).unwrap();
        let reparsed: Value = serde_json::from_str(&record.to_compact_json()).unwrap();
        assert_eq!(reparsed, value);
    }
}
