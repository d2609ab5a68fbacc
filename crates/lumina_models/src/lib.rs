//! Provider integrations for Lumina.
//!
//! Each client implements one capability trait from `lumina_interface`:
//!
//! - **Gemini** text generation through `gemini-rust` (enable with `gemini`)
//! - **OpenAI-compatible** chat completions over plain HTTP
//! - **Imagen** still images on Vertex AI
//! - **Veo** long-running video operations, on AI Studio or Vertex AI
//! - **HTML extraction** of readable page text
//!
//! Clients are built from explicit settings and injected into the pipeline;
//! nothing here reads global state except credential discovery for Vertex.
//!
//! # Example
//!
//! ```no_run
//! use lumina_models::{AiProvider, TextSettings, build_text_generator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = TextSettings::builder()
//!     .provider(AiProvider::OpenAi)
//!     .openai_key(Some("sk-test".to_string()))
//!     .build()?;
//! let generator = build_text_generator(&settings)?;
//! assert_eq!(generator.provider_name(), "openai");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod gcs;
mod html;
mod imagen;
mod openai_compat;
mod preflight;
mod provider;
mod settings;
mod veo;
mod vertex;

#[cfg(feature = "gemini")]
mod gemini;

pub use gcs::{GcsClient, parse_gcs_uri};
pub use html::{HtmlExtractor, extract_text};
pub use imagen::ImagenClient;
pub use openai_compat::{ChatMessage, ChatRequest, ChatResponse, OpenAICompatibleClient};
pub use preflight::{validate_imagen, validate_text_provider, validate_veo};
pub use provider::{AiProvider, build_text_generator};
pub use settings::{
    ImagenSettings, ImagenSettingsBuilder, TextSettings, TextSettingsBuilder, VeoSettings,
    VeoSettingsBuilder, VertexSettings, VertexSettingsBuilder,
};
pub use veo::{VeoClient, clip_from_response, operation_status};
pub use vertex::VertexAuth;

#[cfg(feature = "gemini")]
pub use gemini::GeminiTextClient;
