//! Provider settings assembled by the application configuration.

use crate::AiProvider;
use derive_builder::Builder;
use derive_getters::Getters;

/// Text provider selection and credentials.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Builder)]
#[builder(setter(into))]
pub struct TextSettings {
    /// Provider serving text completions
    #[builder(default)]
    provider: AiProvider,
    /// Gemini API key
    #[builder(default)]
    gemini_api_key: Option<String>,
    /// Gemini model name
    #[builder(default = "\"gemini-2.5-flash\".to_string()")]
    gemini_model: String,
    /// Base URL of the OpenAI-compatible API
    #[builder(default = "\"https://api.openai.com/v1\".to_string()")]
    openai_host: String,
    /// OpenAI API key
    #[builder(default)]
    openai_key: Option<String>,
    /// OpenAI model name
    #[builder(default = "\"gpt-4o-mini\".to_string()")]
    openai_model: String,
}

impl TextSettings {
    /// Creates a new builder for `TextSettings`.
    pub fn builder() -> TextSettingsBuilder {
        TextSettingsBuilder::default()
    }
}

/// Vertex AI project coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Builder)]
#[builder(setter(into))]
pub struct VertexSettings {
    /// Google Cloud project id
    #[builder(default)]
    project: Option<String>,
    /// Region of the Vertex endpoint
    #[builder(default = "\"us-central1\".to_string()")]
    location: String,
    /// Bucket receiving Vertex video output
    #[builder(default)]
    gcs_bucket: Option<String>,
}

impl VertexSettings {
    /// Creates a new builder for `VertexSettings`.
    pub fn builder() -> VertexSettingsBuilder {
        VertexSettingsBuilder::default()
    }
}

impl Default for VertexSettings {
    fn default() -> Self {
        Self {
            project: None,
            location: "us-central1".to_string(),
            gcs_bucket: None,
        }
    }
}

/// Veo video backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Builder)]
#[builder(setter(into))]
pub struct VeoSettings {
    /// Use Vertex AI instead of AI Studio
    #[builder(default)]
    use_vertex: bool,
    /// AI Studio API key
    #[builder(default)]
    api_key: Option<String>,
    /// Veo model name
    #[builder(default = "\"veo-2.0-generate-001\".to_string()")]
    model: String,
    /// Vertex coordinates, used when `use_vertex` is set
    #[builder(default)]
    vertex: VertexSettings,
}

impl VeoSettings {
    /// Creates a new builder for `VeoSettings`.
    pub fn builder() -> VeoSettingsBuilder {
        VeoSettingsBuilder::default()
    }

    /// Mode label used in logs and pre-flight reports.
    pub fn mode_label(&self) -> &'static str {
        if self.use_vertex { "vertex_ai" } else { "ai_studio" }
    }
}

/// Imagen settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Builder)]
#[builder(setter(into))]
pub struct ImagenSettings {
    /// Imagen model name
    #[builder(default = "\"imagen-3.0-generate-002\".to_string()")]
    model: String,
    /// Vertex coordinates
    #[builder(default)]
    vertex: VertexSettings,
}

impl ImagenSettings {
    /// Creates a new builder for `ImagenSettings`.
    pub fn builder() -> ImagenSettingsBuilder {
        ImagenSettingsBuilder::default()
    }
}
