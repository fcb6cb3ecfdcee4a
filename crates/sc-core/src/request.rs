use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

pub const DEFAULT_NAME: &str = "object";
pub const DEFAULT_DIFFICULTY: i64 = 2;
pub const DEFAULT_VISUAL_STYLE: &str = "realistic";

/// Object description sent by callers, over HTTP or as the CLI argument
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub concept: Option<String>,
    #[serde(default = "default_difficulty", deserialize_with = "coerce_difficulty")]
    pub difficulty: Option<i64>,
    #[serde(default = "default_visual_style")]
    pub visual_style: Option<String>,
    #[serde(default)]
    pub educational_context: Option<String>,
}

impl GenerationRequest {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            concept: None,
            difficulty: default_difficulty(),
            visual_style: default_visual_style(),
            educational_context: None,
        }
    }

    /// Take whatever fits from a JSON object and default the rest.
    ///
    /// A missing or non-string `name` becomes `object`, an uncoercible
    /// `difficulty` becomes `None`, and mistyped optional fields are dropped.
    pub fn from_loose(fields: &Map<String, Value>) -> Self {
        let text = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);

        let difficulty = match fields.get("difficulty") {
            None => default_difficulty(),
            Some(value) => difficulty_from_value(value).unwrap_or_else(|reason| {
                warn!("ignoring difficulty: {reason}");
                None
            }),
        };

        Self {
            name: text("name").unwrap_or_else(|| DEFAULT_NAME.to_string()),
            description: text("description"),
            concept: text("concept"),
            difficulty,
            visual_style: text("visualStyle").or_else(default_visual_style),
            educational_context: text("educationalContext"),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_concept(mut self, concept: impl Into<String>) -> Self {
        self.concept = Some(concept.into());
        self
    }
}

fn default_difficulty() -> Option<i64> {
    Some(DEFAULT_DIFFICULTY)
}

fn default_visual_style() -> Option<String> {
    Some(DEFAULT_VISUAL_STYLE.to_string())
}

/// Accepts integers, integral floats and numeric strings
fn coerce_difficulty<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => difficulty_from_value(&value).map_err(D::Error::custom),
    }
}

fn difficulty_from_value(value: &Value) -> Result<Option<i64>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Ok(Some(i)),
            (None, Some(f)) if f.fract() == 0.0 => Ok(Some(f as i64)),
            _ => Err(format!("difficulty must be an integer, got {n}")),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| format!("difficulty must be an integer, got {s:?}")),
        other => Err(format!("difficulty must be an integer, got {other}")),
    }
}
