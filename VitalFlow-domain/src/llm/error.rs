use std::time::Duration;

use thiserror::Error;

/// Failures talking to the upstream provider
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The exchange did not finish within the configured limit
    #[error("Upstream call timed out after {} ms", .0.as_millis())]
    Timeout(Duration),

    /// The provider answered with a non-success status
    #[error("Upstream request failed: {status} {body}")]
    Status { status: u16, body: String },

    /// The request never produced a response
    #[error("Upstream transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response envelope was not the JSON the provider documents
    #[error("Upstream payload could not be decoded: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    /// The response carried no assistant text
    #[error("Upstream returned no text content")]
    EmptyContent,
}

impl UpstreamError {
    /// HTTP status reported by the provider, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Timeout(_))
    }
}

/// Provider text that is not valid JSON once fences are stripped
#[derive(Debug, Error)]
#[error("Malformed model response ({source}): {excerpt}")]
pub struct MalformedResponseError {
    /// First characters of the offending text
    pub excerpt: String,
    #[source]
    pub source: serde_json::Error,
}

const EXCERPT_CHARS: usize = 80;

impl MalformedResponseError {
    pub fn new(text: &str, source: serde_json::Error) -> Self {
        Self {
            excerpt: text.chars().take(EXCERPT_CHARS).collect(),
            source,
        }
    }
}

/// Any failure in the call-and-parse pipeline of a capability
#[derive(Debug, Error)]
pub enum LlmError {
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Malformed(#[from] MalformedResponseError),

    /// A chat request was attempted without any messages
    #[error("Chat request must contain at least one message")]
    EmptyConversation,
}
