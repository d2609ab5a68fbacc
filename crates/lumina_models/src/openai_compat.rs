//! OpenAI-compatible chat completions client.

use async_trait::async_trait;
use derive_builder::Builder;
use derive_getters::Getters;
use lumina_error::{GenerationError, GenerationErrorKind, LuminaResult};
use lumina_interface::TextGenerator;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatMessage {
    /// Message role ("system", "user", "assistant")
    role: String,
    /// Message content
    content: String,
}

impl ChatMessage {
    /// A user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completions request body.
#[derive(Debug, Clone, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatRequest {
    /// Model identifier
    model: String,
    /// Conversation
    messages: Vec<ChatMessage>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl ChatRequest {
    /// Creates a new builder for `ChatRequest`.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Chat completions response body.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    choices: Vec<ChatChoice>,
}

impl ChatResponse {
    /// Content of the first choice.
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message.content.as_str())
    }
}

/// Client for any API exposing `/chat/completions`.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAICompatibleClient {
    /// Create a client; `base_url` is the API root, e.g. `https://api.openai.com/v1`.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenAICompatibleClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> LuminaResult<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: None,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!(url = %url, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::ApiRequest(format!(
                    "Request failed: {}",
                    e
                )))
            })?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(
                GenerationError::new(GenerationErrorKind::HttpStatus { status_code, message })
                    .into(),
            );
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::UnexpectedResponse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        match body.first_content().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(
                GenerationError::new(GenerationErrorKind::EmptyResponse("openai".into())).into(),
            ),
        }
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
