// Testing utilities and mock implementations for the domain layer
// This module is only available in tests or when the "mock" feature is enabled

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::llm::{ChatMessage, ChatOptions, LlmClient, LlmError, UpstreamError};

/// Scripted outcome of a chat call
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Reply with this text
    Text(String),
    /// Fail with a non-success upstream status
    Status(u16, String),
    /// Fail as if the call timed out
    Timeout,
    /// Fail as if the provider returned no text
    Empty,
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        MockReply::Text(text.into())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        MockReply::Status(status, body.into())
    }

    fn into_result(self) -> Result<String, LlmError> {
        match self {
            MockReply::Text(text) => Ok(text),
            MockReply::Status(status, body) => Err(UpstreamError::Status { status, body }.into()),
            MockReply::Timeout => Err(UpstreamError::Timeout(Duration::from_secs(30)).into()),
            MockReply::Empty => Err(UpstreamError::EmptyContent.into()),
        }
    }
}

/// Scripted outcome of an image call
#[derive(Debug, Clone)]
pub enum MockImage {
    /// Return this URL
    Url(String),
    /// Answer without a recognisable image
    NoImage,
    /// Fail with a non-success upstream status
    Status(u16, String),
    /// Fail as if the call timed out
    Timeout,
}

impl MockImage {
    pub fn url(url: impl Into<String>) -> Self {
        MockImage::Url(url.into())
    }

    fn into_result(self) -> Result<Option<String>, LlmError> {
        match self {
            MockImage::Url(url) => Ok(Some(url)),
            MockImage::NoImage => Ok(None),
            MockImage::Status(status, body) => Err(UpstreamError::Status { status, body }.into()),
            MockImage::Timeout => Err(UpstreamError::Timeout(Duration::from_secs(30)).into()),
        }
    }
}

/// In-process [`LlmClient`] that replays scripted outcomes and records calls
#[derive(Debug)]
pub struct MockLlmClient {
    chat_reply: MockReply,
    image_reply: MockImage,
    chat_calls: Mutex<Vec<(Vec<ChatMessage>, ChatOptions)>>,
    image_calls: Mutex<Vec<String>>,
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLlmClient {
    /// Create a mock whose calls all time out
    pub fn new() -> Self {
        Self {
            chat_reply: MockReply::Timeout,
            image_reply: MockImage::Timeout,
            chat_calls: Mutex::new(Vec::new()),
            image_calls: Mutex::new(Vec::new()),
        }
    }

    /// Configure the outcome of every chat call
    pub fn with_chat(mut self, reply: MockReply) -> Self {
        self.chat_reply = reply;
        self
    }

    /// Configure the outcome of every image call
    pub fn with_image(mut self, reply: MockImage) -> Self {
        self.image_reply = reply;
        self
    }

    pub fn chat_call_count(&self) -> usize {
        self.chat_calls.lock().unwrap().len()
    }

    pub fn image_call_count(&self) -> usize {
        self.image_calls.lock().unwrap().len()
    }

    /// Messages of the most recent chat call
    pub fn last_chat_messages(&self) -> Option<Vec<ChatMessage>> {
        self.chat_calls
            .lock()
            .unwrap()
            .last()
            .map(|(messages, _)| messages.clone())
    }

    /// Options of the most recent chat call
    pub fn last_chat_options(&self) -> Option<ChatOptions> {
        self.chat_calls.lock().unwrap().last().map(|(_, options)| *options)
    }

    /// Every prompt sent to the image endpoint, in order
    pub fn image_prompts(&self) -> Vec<String> {
        self.image_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete_chat(
        &self,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<String, LlmError> {
        if messages.is_empty() {
            return Err(LlmError::EmptyConversation);
        }

        self.chat_calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), options));
        self.chat_reply.clone().into_result()
    }

    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, LlmError> {
        self.image_calls.lock().unwrap().push(prompt.to_string());
        self.image_reply.clone().into_result()
    }
}
