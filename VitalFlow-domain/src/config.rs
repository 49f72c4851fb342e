//! Upstream provider configuration
//!
//! The configuration is read once at process start and handed to the
//! [`DashScopeClient`](crate::llm::DashScopeClient); nothing in the domain
//! layer reads the environment after that.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::llm::ImageResponseFormat;

pub const DEFAULT_CHAT_URL: &str =
    "https://dashscope.aliyuncs.com/compatible-mode/v1/chat/completions";
pub const DEFAULT_IMAGE_URL: &str =
    "https://dashscope.aliyuncs.com/api/v1/services/aigc/multimodal-generation/generation";
pub const DEFAULT_TEXT_MODEL: &str = "qwen3-max";
pub const DEFAULT_IMAGE_SIZE: &str = "1664*928";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Errors raised while building the provider configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Environment variable QWEN_API_KEY is required.")]
    MissingApiKey,

    #[error("Invalid provider configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Provider configuration for chat and image generation
#[derive(Clone)]
pub struct LlmConfig {
    /// Bearer credential for the provider
    pub api_key: String,
    /// Chat-completion endpoint
    pub chat_url: String,
    /// Image-generation endpoint
    pub image_url: String,
    /// Model used for chat completions
    pub text_model: String,
    /// Model used for illustrations
    pub image_model: String,
    /// Requested image size, e.g. `1664*928`
    pub image_size: String,
    /// Wall-clock limit for one chat exchange
    pub chat_timeout: Duration,
    /// Wall-clock limit for one image exchange
    pub image_timeout: Duration,
    /// Which response shape the image endpoint returns
    pub image_response_format: ImageResponseFormat,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"<redacted>")
            .field("chat_url", &self.chat_url)
            .field("image_url", &self.image_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("image_size", &self.image_size)
            .field("chat_timeout", &self.chat_timeout)
            .field("image_timeout", &self.image_timeout)
            .field("image_response_format", &self.image_response_format)
            .finish()
    }
}

impl LlmConfig {
    /// Build a configuration with default endpoints, models and timeouts
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            chat_url: DEFAULT_CHAT_URL.to_string(),
            image_url: DEFAULT_IMAGE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_TEXT_MODEL.to_string(),
            image_size: DEFAULT_IMAGE_SIZE.to_string(),
            chat_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            image_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            image_response_format: ImageResponseFormat::Auto,
        }
    }

    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = var("QWEN_API_KEY").ok_or(ConfigError::MissingApiKey)?;
        let mut config = Self::new(api_key);

        if let Some(url) = var("QWEN_CHAT_URL") {
            config.chat_url = url;
        }
        if let Some(url) = var("QWEN_IMAGE_URL") {
            config.image_url = url;
        }

        config.text_model = var("QWEN_TEXT_MODEL")
            .or_else(|| var("QWEN_MODEL"))
            .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string());
        config.image_model = var("QWEN_IMAGE_MODEL").unwrap_or_else(|| config.text_model.clone());

        if let Some(size) = var("QWEN_IMAGE_SIZE") {
            config.image_size = size;
        }

        let chat_ms = parse_millis("QWEN_TIMEOUT_MS", var("QWEN_TIMEOUT_MS"), DEFAULT_TIMEOUT_MS);
        config.chat_timeout = Duration::from_millis(chat_ms);
        config.image_timeout = Duration::from_millis(parse_millis(
            "QWEN_IMAGE_TIMEOUT_MS",
            var("QWEN_IMAGE_TIMEOUT_MS"),
            chat_ms,
        ));

        if let Some(format) = var("QWEN_IMAGE_RESPONSE_FORMAT") {
            config.image_response_format = format.parse().unwrap_or_else(|_| {
                warn!("Unknown QWEN_IMAGE_RESPONSE_FORMAT '{}', probing all shapes", format);
                ImageResponseFormat::Auto
            });
        }

        config.validate().map_err(ConfigError::Invalid)?;
        debug!(?config, "Provider configuration loaded");

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.api_key.trim().is_empty() {
            errors.push("QWEN_API_KEY must not be empty".to_string());
        }

        if let Err(e) = url::Url::parse(&self.chat_url) {
            errors.push(format!("QWEN_CHAT_URL is not a valid URL: {}", e));
        }

        if let Err(e) = url::Url::parse(&self.image_url) {
            errors.push(format!("QWEN_IMAGE_URL is not a valid URL: {}", e));
        }

        if self.chat_timeout.is_zero() {
            errors.push("QWEN_TIMEOUT_MS must be greater than zero".to_string());
        }

        if self.image_timeout.is_zero() {
            errors.push("QWEN_IMAGE_TIMEOUT_MS must be greater than zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn parse_millis(name: &str, raw: Option<String>, default: u64) -> u64 {
    match raw {
        Some(raw) => raw.parse::<u64>().unwrap_or_else(|_| {
            warn!("{} is not a number ('{}'), using {} ms", name, raw, default);
            default
        }),
        None => default,
    }
}
