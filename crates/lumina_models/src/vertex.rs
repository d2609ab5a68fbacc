//! Vertex AI authentication.

use gcp_auth::{CustomServiceAccount, TokenProvider};
use lumina_error::{GenerationError, GenerationErrorKind, LuminaResult};
use std::sync::Arc;
use tracing::{debug, instrument};

/// OAuth scope covering Vertex AI and Cloud Storage.
const CLOUD_PLATFORM_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Bearer-token source for Vertex AI and Cloud Storage requests.
#[derive(Clone)]
pub struct VertexAuth {
    provider: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for VertexAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VertexAuth").finish_non_exhaustive()
    }
}

impl VertexAuth {
    /// Discover credentials: the service account named by
    /// `GOOGLE_APPLICATION_CREDENTIALS` first, then application default
    /// credentials.
    #[instrument]
    pub async fn discover() -> LuminaResult<Self> {
        let service_account = CustomServiceAccount::from_env().map_err(|e| {
            GenerationError::new(GenerationErrorKind::Authentication(format!(
                "Failed to load service account: {}",
                e
            )))
        })?;

        let provider: Arc<dyn TokenProvider> = match service_account {
            Some(account) => {
                debug!("Using service account credentials");
                Arc::new(account)
            }
            None => gcp_auth::provider().await.map_err(|e| {
                GenerationError::new(GenerationErrorKind::Authentication(e.to_string()))
            })?,
        };

        Ok(Self { provider })
    }

    /// Wrap an existing token provider.
    pub fn from_provider(provider: Arc<dyn TokenProvider>) -> Self {
        Self { provider }
    }

    /// Fetch a bearer token.
    pub async fn bearer(&self) -> LuminaResult<String> {
        let token = self
            .provider
            .token(&[CLOUD_PLATFORM_SCOPE])
            .await
            .map_err(|e| GenerationError::new(GenerationErrorKind::Authentication(e.to_string())))?;
        Ok(token.as_str().to_string())
    }
}

/// Base URL of the regional Vertex AI endpoint for a publisher model.
pub(crate) fn publisher_model_url(project: &str, location: &str, model: &str) -> String {
    format!(
        "https://{location}-aiplatform.googleapis.com/v1/projects/{project}/locations/{location}/publishers/google/models/{model}"
    )
}
