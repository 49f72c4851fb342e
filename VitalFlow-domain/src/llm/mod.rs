//! Upstream LLM provider access
//!
//! Capabilities talk to the provider through the [`LlmClient`] trait. The
//! production implementation is [`DashScopeClient`]; tests substitute a
//! scripted client.

pub mod dashscope;
pub mod error;
pub mod payload;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

pub use dashscope::DashScopeClient;
pub use error::{LlmError, MalformedResponseError, UpstreamError};
pub use payload::ImageResponseFormat;

/// Author of a chat message
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One turn of a chat conversation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Output format requested from the chat endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Ask the provider to emit a single JSON object
    JsonObject,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::JsonObject => "json_object",
        }
    }
}

/// Per-call tuning for a chat completion
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChatOptions {
    pub response_format: Option<ResponseFormat>,
    pub temperature: Option<f32>,
}

impl ChatOptions {
    /// Request a JSON object at the given temperature
    pub fn json(temperature: f32) -> Self {
        Self {
            response_format: Some(ResponseFormat::JsonObject),
            temperature: Some(temperature),
        }
    }

    /// Request free text at the given temperature
    pub fn text(temperature: f32) -> Self {
        Self {
            response_format: None,
            temperature: Some(temperature),
        }
    }
}

/// Access to an upstream chat and image generation provider
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send `messages` to the chat endpoint and return the assistant's
    /// trimmed text. Fails when the call times out, the provider answers
    /// with a non-success status, or no text can be extracted.
    async fn complete_chat(
        &self,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<String, LlmError>;

    /// Generate one illustration for `prompt`.
    ///
    /// `Ok(None)` means the provider answered but in a shape that carries
    /// no recognisable image.
    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, LlmError>;
}

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Arc<T> {
    async fn complete_chat(
        &self,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<String, LlmError> {
        (**self).complete_chat(messages, options).await
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, LlmError> {
        (**self).generate_image(prompt).await
    }
}
