use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::LlmConfig;
use super::error::{LlmError, UpstreamError};
use super::payload::{ChatCompletion, ChatRequest, ImageRequest};
use super::{ChatMessage, ChatOptions, LlmClient};

/// Race `request` against a timer of `limit`.
///
/// When the timer wins the request future is dropped, so nothing observes
/// its eventual result.
pub async fn with_timeout<T, F>(limit: Duration, request: F) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    match tokio::time::timeout(limit, request).await {
        Ok(result) => result,
        Err(_) => Err(UpstreamError::Timeout(limit)),
    }
}

/// [`LlmClient`] backed by DashScope's HTTP APIs
pub struct DashScopeClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl DashScopeClient {
    /// Create a client for the given provider configuration
    pub fn new(config: LlmConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// POST `body` as JSON and decode the JSON reply, all within `limit`
    async fn post_json<B>(
        &self,
        url: &str,
        body: &B,
        limit: Duration,
    ) -> Result<serde_json::Value, UpstreamError>
    where
        B: Serialize + Sync,
    {
        with_timeout(limit, async {
            let response = self
                .http
                .post(url)
                .bearer_auth(&self.config.api_key)
                .json(body)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(UpstreamError::Status {
                    status: status.as_u16(),
                    body,
                });
            }

            let bytes = response.bytes().await?;
            let payload: serde_json::Value =
                serde_json::from_slice(&bytes).map_err(UpstreamError::InvalidPayload)?;
            Ok::<_, UpstreamError>(payload)
        })
        .await
    }
}

#[async_trait]
impl LlmClient for DashScopeClient {
    #[instrument(skip(self, messages), fields(model = %self.config.text_model, messages = messages.len()))]
    async fn complete_chat(
        &self,
        messages: &[ChatMessage],
        options: ChatOptions,
    ) -> Result<String, LlmError> {
        if messages.is_empty() {
            return Err(LlmError::EmptyConversation);
        }

        let request = ChatRequest::new(&self.config.text_model, messages, options);
        let payload = self
            .post_json(&self.config.chat_url, &request, self.config.chat_timeout)
            .await?;

        let completion =
            ChatCompletion::deserialize(&payload).map_err(UpstreamError::InvalidPayload)?;
        let text = completion.message_text().ok_or(UpstreamError::EmptyContent)?;

        debug!(chars = text.chars().count(), "Chat completion received");
        Ok(text)
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.image_model))]
    async fn generate_image(&self, prompt: &str) -> Result<Option<String>, LlmError> {
        let request = ImageRequest::new(&self.config.image_model, prompt, &self.config.image_size);
        let payload = self
            .post_json(&self.config.image_url, &request, self.config.image_timeout)
            .await?;

        let image = self.config.image_response_format.extract(&payload);
        if image.is_none() {
            debug!("Image response carried no recognisable image");
        }

        Ok(image)
    }
}
