//! Conversion of model text output into typed values

use serde::de::DeserializeOwned;

use crate::llm::MalformedResponseError;

const FENCE: &str = "```";
const JSON_TAG: &str = "json";

/// Remove a surrounding markdown code fence, if any.
///
/// The leading fence may carry a `json` tag in any case. Either fence may be
/// missing; surrounding whitespace is always trimmed.
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix(FENCE) {
        let rest = match rest.get(..JSON_TAG.len()) {
            Some(tag) if tag.eq_ignore_ascii_case(JSON_TAG) => &rest[JSON_TAG.len()..],
            _ => rest,
        };
        body = rest.trim_start();
    }

    if let Some(rest) = body.strip_suffix(FENCE) {
        body = rest.trim_end();
    }

    body.trim()
}

/// Parse model output, optionally fenced, as JSON into `T`.
///
/// Missing or loosely typed fields are left to `T`'s own deserializers; text
/// that is not JSON, or JSON that `T` cannot take at all, is reported as
/// [`MalformedResponseError`].
pub fn parse_structured<T: DeserializeOwned>(text: &str) -> Result<T, MalformedResponseError> {
    let cleaned = strip_code_fence(text);
    serde_json::from_str(cleaned).map_err(|e| MalformedResponseError::new(cleaned, e))
}
