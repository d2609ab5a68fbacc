//! Imagen still-image generation on Vertex AI.

use crate::vertex::publisher_model_url;
use crate::{ImagenSettings, VertexAuth};
use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use lumina_error::{GenerationError, GenerationErrorKind, LuminaResult};
use lumina_interface::ImageGenerator;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

/// Imagen client producing square PNG infographics.
#[derive(Debug, Clone)]
pub struct ImagenClient {
    http: Client,
    auth: VertexAuth,
    project: String,
    location: String,
    model: String,
}

impl ImagenClient {
    /// Create a client; the Vertex project must be configured.
    pub fn new(settings: &ImagenSettings, auth: VertexAuth) -> LuminaResult<Self> {
        let project = settings.vertex().project().clone().ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::MissingCredentials(
                "Vertex project".into(),
            ))
        })?;
        Ok(Self {
            http: Client::new(),
            auth,
            project,
            location: settings.vertex().location().clone(),
            model: settings.model().clone(),
        })
    }

    /// Model name.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Request one image, returning `None` when the service produced none
    /// (for instance when the prompt was filtered).
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    pub async fn request_image(&self, prompt: &str) -> LuminaResult<Option<Vec<u8>>> {
        let url = format!(
            "{}:predict",
            publisher_model_url(&self.project, &self.location, &self.model)
        );
        let body = json!({
            "instances": [{ "prompt": prompt }],
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": "1:1",
                "personGeneration": "dont_allow",
                "safetySetting": "block_medium_and_above",
            }
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.auth.bearer().await?)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::new(GenerationErrorKind::ApiRequest(e.to_string())))?;

        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(
                GenerationError::new(GenerationErrorKind::HttpStatus { status_code, message })
                    .into(),
            );
        }

        let parsed: PredictResponse = response.json().await.map_err(|e| {
            GenerationError::new(GenerationErrorKind::UnexpectedResponse(e.to_string()))
        })?;

        let Some(encoded) = parsed
            .predictions
            .into_iter()
            .find_map(|prediction| prediction.bytes_base64_encoded)
        else {
            debug!("Imagen returned no predictions");
            return Ok(None);
        };

        let bytes = STANDARD
            .decode(encoded.as_bytes())
            .map_err(|e| GenerationError::new(GenerationErrorKind::Base64Decode(e.to_string())))?;
        Ok(Some(bytes))
    }
}

#[async_trait]
impl ImageGenerator for ImagenClient {
    async fn generate_image(&self, prompt: &str) -> Option<Vec<u8>> {
        match self.request_image(prompt).await {
            Ok(Some(bytes)) => {
                info!(size = bytes.len(), "Generated infographic");
                Some(bytes)
            }
            Ok(None) => {
                warn!("Imagen produced no image");
                None
            }
            Err(e) => {
                warn!(error = %e, "Image generation failed");
                None
            }
        }
    }
}
