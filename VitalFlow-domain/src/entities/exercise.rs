use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[cfg(feature = "with-api")]
use utoipa::ToSchema;

use super::lenient;

/// Duration used when the model omits `durationSeconds`
pub const DEFAULT_DURATION_SECONDS: u32 = 90;

/// How demanding a micro-exercise is
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// Map a model-supplied label onto a difficulty.
    ///
    /// Accepts the English labels in any case as well as the Chinese
    /// labels the model tends to produce when asked to answer in Chinese.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "easy" | "简单" | "容易" | "低" => Some(Difficulty::Easy),
            "medium" | "中等" | "适中" | "中" => Some(Difficulty::Medium),
            "hard" | "困难" | "较难" | "高" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Unknown labels, `null` and non-string values read as [`Difficulty::Medium`]
impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let difficulty = match Value::deserialize(deserializer)? {
            Value::String(label) => Difficulty::from_label(&label),
            _ => None,
        };
        Ok(difficulty.unwrap_or_default())
    }
}

/// A short, desk-friendly exercise suggested by the coach
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "with-api", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ExerciseSuggestion {
    /// Display name of the exercise
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,

    /// How to perform it
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,

    /// Suggested duration, conceptually 60-120 seconds
    #[serde(
        default = "default_duration_seconds",
        deserialize_with = "lenient::duration_seconds"
    )]
    pub duration_seconds: u32,

    #[serde(default)]
    pub difficulty: Difficulty,

    /// A light-hearted fact about the exercise
    #[serde(default, deserialize_with = "lenient::string")]
    pub fun_fact: String,

    /// Illustration as a remote URL or a `data:` URL.
    /// Only the image endpoint may supply it, never the chat reply.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn default_duration_seconds() -> u32 {
    DEFAULT_DURATION_SECONDS
}
