//! Text provider selection.

use crate::{OpenAICompatibleClient, TextSettings};
use lumina_error::{GenerationError, GenerationErrorKind, LuminaResult};
use lumina_interface::TextGenerator;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Provider serving text completions.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    /// Google Gemini
    #[default]
    #[display("gemini")]
    Gemini,
    /// Any OpenAI-compatible chat completions API
    #[serde(rename = "openai")]
    #[display("openai")]
    OpenAi,
}

impl std::str::FromStr for AiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(AiProvider::Gemini),
            "openai" => Ok(AiProvider::OpenAi),
            other => Err(format!("Unknown AI provider: {}", other)),
        }
    }
}

/// Build the text generator selected by the settings.
pub fn build_text_generator(settings: &TextSettings) -> LuminaResult<Arc<dyn TextGenerator>> {
    match settings.provider() {
        AiProvider::OpenAi => {
            let key = settings.openai_key().clone().ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::MissingCredentials("OpenAI".into()))
            })?;
            Ok(Arc::new(OpenAICompatibleClient::new(
                key,
                settings.openai_host().clone(),
                settings.openai_model().clone(),
            )))
        }
        AiProvider::Gemini => build_gemini(settings),
    }
}

#[cfg(feature = "gemini")]
fn build_gemini(settings: &TextSettings) -> LuminaResult<Arc<dyn TextGenerator>> {
    let key = settings.gemini_api_key().as_deref().ok_or_else(|| {
        GenerationError::new(GenerationErrorKind::MissingCredentials("Gemini".into()))
    })?;
    Ok(Arc::new(crate::GeminiTextClient::new(key, settings.gemini_model())?))
}

#[cfg(not(feature = "gemini"))]
fn build_gemini(_settings: &TextSettings) -> LuminaResult<Arc<dyn TextGenerator>> {
    Err(GenerationError::new(GenerationErrorKind::ClientCreation(
        "Gemini support requires the `gemini` feature".into(),
    ))
    .into())
}
