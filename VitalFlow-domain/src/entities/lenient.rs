//! Field deserializers for model-authored JSON.
//!
//! The model is asked for a shape but not held to it. These helpers accept
//! whatever JSON value sits in a field and coerce it, so a reply is only
//! rejected when it is not JSON at all.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::exercise::DEFAULT_DURATION_SECONDS;

fn render(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items
            .into_iter()
            .map(render)
            .filter(|item| !item.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        object @ Value::Object(_) => object.to_string(),
    }
}

/// Any JSON value as text; `null` becomes the empty string and array
/// elements are joined one per line.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(render)
}

/// A duration in whole seconds from an integer, a float or a numeric string.
///
/// Fractions are rounded; anything that is not a positive number yields
/// [`DEFAULT_DURATION_SECONDS`].
pub(crate) fn duration_seconds<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let seconds = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(match seconds {
        Some(seconds) if seconds.is_finite() && seconds.round() >= 1.0 => {
            seconds.round().min(u32::MAX as f64) as u32
        }
        _ => DEFAULT_DURATION_SECONDS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "string")]
        text: String,
        #[serde(default = "default_seconds", deserialize_with = "duration_seconds")]
        seconds: u32,
    }

    fn default_seconds() -> u32 {
        DEFAULT_DURATION_SECONDS
    }

    fn read(value: serde_json::Value) -> Fields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_string_coercion() {
        assert_eq!(read(json!({ "text": null })).text, "");
        assert_eq!(read(json!({ "text": 42 })).text, "42");
        assert_eq!(read(json!({ "text": true })).text, "true");
        assert_eq!(read(json!({ "text": ["多喝水", null, "少熬夜"] })).text, "多喝水\n少熬夜");
        assert_eq!(read(json!({ "text": { "a": 1 } })).text, r#"{"a":1}"#);
        assert_eq!(read(json!({})).text, "");
    }

    #[test]
    fn test_duration_coercion() {
        assert_eq!(read(json!({ "seconds": 75 })).seconds, 75);
        assert_eq!(read(json!({ "seconds": 90.0 })).seconds, 90);
        assert_eq!(read(json!({ "seconds": 59.6 })).seconds, 60);
        assert_eq!(read(json!({ "seconds": " 120 " })).seconds, 120);
        assert_eq!(read(json!({ "seconds": "一分钟" })).seconds, DEFAULT_DURATION_SECONDS);
        assert_eq!(read(json!({ "seconds": -30 })).seconds, DEFAULT_DURATION_SECONDS);
        assert_eq!(read(json!({ "seconds": null })).seconds, DEFAULT_DURATION_SECONDS);
        assert_eq!(read(json!({ "seconds": [60] })).seconds, DEFAULT_DURATION_SECONDS);
        assert_eq!(read(json!({})).seconds, DEFAULT_DURATION_SECONDS);
    }
}
