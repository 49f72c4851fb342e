//! Wire shapes exchanged with the provider and extraction of the values
//! the capabilities need from them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ChatMessage, ChatOptions, ChatRole};

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormatBody>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponseFormatBody {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl<'a> ChatRequest<'a> {
    pub fn new(model: &'a str, messages: &'a [ChatMessage], options: ChatOptions) -> Self {
        Self {
            model,
            messages,
            temperature: options.temperature,
            response_format: options.response_format.map(|format| ResponseFormatBody {
                kind: format.as_str(),
            }),
        }
    }
}

/// Chat completion envelope
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<MessageContent>,
}

/// Assistant content is either a plain string or a list of typed parts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
    Other(serde_json::Value),
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl MessageContent {
    /// Trimmed text of the content, `None` when nothing usable is present
    pub fn text(&self) -> Option<String> {
        let text = match self {
            MessageContent::Text(text) => Some(text.as_str()),
            MessageContent::Parts(parts) => parts
                .iter()
                .find(|part| part.kind.as_deref() == Some("text"))
                .and_then(|part| part.text.as_deref()),
            MessageContent::Other(_) => None,
        }?;

        let text = text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }
}

impl ChatCompletion {
    /// Text of the first choice
    pub fn message_text(&self) -> Option<String> {
        self.choices
            .first()?
            .message
            .as_ref()?
            .content
            .as_ref()?
            .text()
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageRequest<'a> {
    pub model: &'a str,
    pub input: ImageInput<'a>,
    pub parameters: ImageParameters<'a>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageInput<'a> {
    pub messages: Vec<ImagePromptMessage<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImagePromptMessage<'a> {
    pub role: ChatRole,
    pub content: Vec<ImagePromptText<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImagePromptText<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ImageParameters<'a> {
    pub size: &'a str,
    pub n: u8,
}

impl<'a> ImageRequest<'a> {
    pub fn new(model: &'a str, prompt: &'a str, size: &'a str) -> Self {
        Self {
            model,
            input: ImageInput {
                messages: vec![ImagePromptMessage {
                    role: ChatRole::User,
                    content: vec![ImagePromptText { text: prompt }],
                }],
            },
            parameters: ImageParameters { size, n: 1 },
        }
    }
}

/// A generated image as a hosted URL or an inline base64 payload
#[derive(Debug, Default, Deserialize)]
pub struct ImageDatum {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub b64_json: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl ImageDatum {
    /// Hosted URL if present, otherwise the payload as a `data:` URL
    pub fn into_url(self) -> Option<String> {
        if let Some(url) = self.url.filter(|url| !url.is_empty()) {
            return Some(url);
        }

        let payload = self.b64_json.filter(|payload| !payload.is_empty())?;
        let mime = self.mime_type.as_deref().unwrap_or("image/png");
        Some(format!("data:{};base64,{}", mime, payload))
    }
}

/// `output.choices[].message.content[].image`
#[derive(Debug, Deserialize)]
pub struct MultimodalEnvelope {
    pub output: MultimodalOutput,
}

#[derive(Debug, Deserialize)]
pub struct MultimodalOutput {
    #[serde(default)]
    pub choices: Vec<MultimodalChoice>,
}

#[derive(Debug, Deserialize)]
pub struct MultimodalChoice {
    #[serde(default)]
    pub message: Option<MultimodalMessage>,
}

#[derive(Debug, Deserialize)]
pub struct MultimodalMessage {
    #[serde(default)]
    pub content: Vec<MultimodalPart>,
}

#[derive(Debug, Deserialize)]
pub struct MultimodalPart {
    #[serde(default)]
    pub image: Option<String>,
}

/// `output.results[]`
#[derive(Debug, Deserialize)]
pub struct SynthesisEnvelope {
    pub output: SynthesisOutput,
}

#[derive(Debug, Deserialize)]
pub struct SynthesisOutput {
    #[serde(default)]
    pub results: Vec<ImageDatum>,
}

/// `data[]`
#[derive(Debug, Deserialize)]
pub struct OpenAiImageEnvelope {
    #[serde(default)]
    pub data: Vec<ImageDatum>,
}

/// Image response shapes understood by the client
#[derive(Debug)]
pub enum ImagePayload {
    Multimodal(MultimodalEnvelope),
    Synthesis(SynthesisEnvelope),
    OpenAi(OpenAiImageEnvelope),
}

impl ImagePayload {
    pub fn into_image_url(self) -> Option<String> {
        match self {
            ImagePayload::Multimodal(envelope) => envelope
                .output
                .choices
                .into_iter()
                .next()?
                .message?
                .content
                .into_iter()
                .find_map(|part| part.image.filter(|image| !image.is_empty())),
            ImagePayload::Synthesis(envelope) => {
                envelope.output.results.into_iter().next()?.into_url()
            }
            ImagePayload::OpenAi(envelope) => envelope.data.into_iter().next()?.into_url(),
        }
    }
}

/// Strategy for reading the image endpoint's response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageResponseFormat {
    /// Try every known shape in turn
    #[default]
    Auto,
    Multimodal,
    Synthesis,
    OpenAi,
}

impl ImageResponseFormat {
    const PROBE_ORDER: [ImageResponseFormat; 3] = [
        ImageResponseFormat::Multimodal,
        ImageResponseFormat::Synthesis,
        ImageResponseFormat::OpenAi,
    ];

    fn decode(&self, value: &serde_json::Value) -> Option<ImagePayload> {
        match self {
            ImageResponseFormat::Auto => None,
            ImageResponseFormat::Multimodal => MultimodalEnvelope::deserialize(value)
                .ok()
                .map(ImagePayload::Multimodal),
            ImageResponseFormat::Synthesis => SynthesisEnvelope::deserialize(value)
                .ok()
                .map(ImagePayload::Synthesis),
            ImageResponseFormat::OpenAi => OpenAiImageEnvelope::deserialize(value)
                .ok()
                .map(ImagePayload::OpenAi),
        }
    }

    /// Image URL carried by `value`, `None` when the shape is unrecognised
    pub fn extract(&self, value: &serde_json::Value) -> Option<String> {
        match self {
            ImageResponseFormat::Auto => Self::PROBE_ORDER
                .iter()
                .find_map(|format| format.extract(value)),
            format => format.decode(value)?.into_image_url(),
        }
    }
}

impl FromStr for ImageResponseFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(ImageResponseFormat::Auto),
            "multimodal" | "dashscope" => Ok(ImageResponseFormat::Multimodal),
            "synthesis" => Ok(ImageResponseFormat::Synthesis),
            "openai" => Ok(ImageResponseFormat::OpenAi),
            other => Err(format!("unknown image response format: {}", other)),
        }
    }
}
