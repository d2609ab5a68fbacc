//! Google Gemini text generation.

use async_trait::async_trait;
use gemini_rust::{Gemini, client::Model};
use lumina_error::{GenerationError, GenerationErrorKind, LuminaResult};
use lumina_interface::TextGenerator;
use tracing::{debug, instrument};

/// Gemini client bound to one model.
#[derive(Clone)]
pub struct GeminiTextClient {
    client: Gemini,
    model: String,
}

impl std::fmt::Debug for GeminiTextClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiTextClient")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl GeminiTextClient {
    /// Create a client for the named model.
    #[instrument(skip(api_key))]
    pub fn new(api_key: &str, model: &str) -> LuminaResult<Self> {
        let client = Gemini::with_model(api_key, Self::model_name_to_enum(model)).map_err(|e| {
            GenerationError::new(GenerationErrorKind::ClientCreation(e.to_string()))
        })?;
        Ok(Self {
            client,
            model: model.to_string(),
        })
    }

    /// Map a model name to the `gemini-rust` enum, prefixing unknown names
    /// with `models/`.
    fn model_name_to_enum(name: &str) -> Model {
        match name {
            "gemini-2.5-flash" => Model::Gemini25Flash,
            "gemini-2.5-flash-lite" => Model::Gemini25FlashLite,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            other if other.starts_with("models/") => Model::Custom(other.to_string()),
            other => Model::Custom(format!("models/{}", other)),
        }
    }

    /// Convert a `gemini-rust` error, keeping the HTTP status when the
    /// message carries one ("...; code 503; ...").
    fn parse_error(err: impl std::fmt::Display) -> GenerationError {
        let message = err.to_string();
        let status_code = message.find("code ").and_then(|start| {
            let rest = &message[start + 5..];
            let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
            rest[..end].parse().ok()
        });
        match status_code {
            Some(status_code) => {
                GenerationError::new(GenerationErrorKind::HttpStatus { status_code, message })
            }
            None => GenerationError::new(GenerationErrorKind::ApiRequest(message)),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiTextClient {
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> LuminaResult<String> {
        let response = self
            .client
            .generate_content()
            .with_user_message(prompt)
            .execute()
            .await
            .map_err(Self::parse_error)?;

        let text = response.text();
        if text.trim().is_empty() {
            return Err(
                GenerationError::new(GenerationErrorKind::EmptyResponse("gemini".into())).into(),
            );
        }
        debug!(response_len = text.len(), "Gemini response received");
        Ok(text)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
