//! Veo long-running video generation.
//!
//! Two backends serve Veo with different capabilities:
//!
//! - **AI Studio**: API-key authentication, clip extension supported, clips
//!   downloaded through the files endpoint
//! - **Vertex AI**: service-account authentication, single clips only,
//!   output written to a Cloud Storage bucket
//!
//! The difference is exposed as a [`VideoBackend`] descriptor rather than
//! branches in the caller.

use crate::gcs::bare_bucket;
use crate::vertex::publisher_model_url;
use crate::{GcsClient, VeoSettings, VertexAuth};
use async_trait::async_trait;
use lumina_error::{
    GenerationError, GenerationErrorKind, LuminaResult, VideoError, VideoErrorKind,
};
use lumina_interface::{
    ClipHandle, OperationHandle, OperationStatus, VideoBackend, VideoGenerator,
};
use reqwest::Client;
use serde_json::{Value, json};
use tracing::{debug, info, instrument};
use uuid::Uuid;

const AI_STUDIO_API: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Extract the clip handle from a finished operation's `response` payload.
///
/// Understands the AI Studio shape
/// (`generateVideoResponse.generatedSamples[].video.uri`) and the Vertex
/// shape (`videos[].gcsUri`).
///
/// # Examples
///
/// ```
/// use lumina_models::clip_from_response;
/// use serde_json::json;
///
/// let vertex = json!({ "videos": [{ "gcsUri": "gs://b/v/sample_0.mp4", "mimeType": "video/mp4" }] });
/// let clip = clip_from_response(&vertex).unwrap();
/// assert_eq!(clip.uri, "gs://b/v/sample_0.mp4");
/// assert_eq!(clip.mime_type.as_deref(), Some("video/mp4"));
/// ```
pub fn clip_from_response(response: &Value) -> Option<ClipHandle> {
    let ai_studio = response
        .pointer("/generateVideoResponse/generatedSamples/0/video")
        .and_then(|video| Some((video.get("uri")?.as_str()?, video.get("mimeType"))));
    let vertex = response
        .pointer("/videos/0")
        .and_then(|video| Some((video.get("gcsUri")?.as_str()?, video.get("mimeType"))));

    ai_studio.or(vertex).map(|(uri, mime)| ClipHandle {
        uri: uri.to_string(),
        mime_type: mime.and_then(Value::as_str).map(str::to_string),
    })
}

/// Interpret an operation resource returned by either backend.
///
/// # Examples
///
/// ```
/// use lumina_interface::OperationStatus;
/// use lumina_models::operation_status;
/// use serde_json::json;
///
/// assert_eq!(operation_status(&json!({ "name": "op", "done": false })), OperationStatus::Pending);
/// assert!(matches!(
///     operation_status(&json!({ "done": true, "error": { "code": 3, "message": "bad prompt" } })),
///     OperationStatus::Error(msg) if msg.contains("bad prompt")
/// ));
/// ```
pub fn operation_status(operation: &Value) -> OperationStatus {
    if let Some(error) = operation.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        let code = error.get("code").and_then(Value::as_i64).unwrap_or_default();
        return OperationStatus::Error(format!("code {}: {}", code, message));
    }

    if !operation.get("done").and_then(Value::as_bool).unwrap_or(false) {
        return OperationStatus::Pending;
    }

    let response = operation.get("response").unwrap_or(&Value::Null);
    match clip_from_response(response) {
        Some(clip) => OperationStatus::Done(clip),
        None => {
            let reasons: Vec<&str> = response
                .pointer("/generateVideoResponse/raiMediaFilteredReasons")
                .and_then(Value::as_array)
                .map(|reasons| reasons.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();
            if reasons.is_empty() {
                OperationStatus::Error("operation finished without a video".to_string())
            } else {
                OperationStatus::Error(format!("video filtered: {}", reasons.join("; ")))
            }
        }
    }
}

#[derive(Debug, Clone)]
enum VeoEndpoint {
    AiStudio {
        api_key: String,
    },
    Vertex {
        auth: VertexAuth,
        gcs: GcsClient,
        project: String,
        location: String,
        bucket: String,
    },
}

/// Veo client for either backend.
#[derive(Debug, Clone)]
pub struct VeoClient {
    http: Client,
    model: String,
    backend: VideoBackend,
    endpoint: VeoEndpoint,
}

impl VeoClient {
    /// AI Studio client authenticated with an API key.
    pub fn ai_studio(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            model: model.into(),
            backend: VideoBackend::ai_studio(),
            endpoint: VeoEndpoint::AiStudio {
                api_key: api_key.into(),
            },
        }
    }

    /// Vertex AI client; project and output bucket must be configured.
    pub fn vertex(settings: &VeoSettings, auth: VertexAuth) -> LuminaResult<Self> {
        let vertex = settings.vertex();
        let project = vertex.project().clone().ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::MissingCredentials(
                "Vertex project".into(),
            ))
        })?;
        let bucket = vertex.gcs_bucket().clone().ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::MissingCredentials(
                "Vertex output bucket".into(),
            ))
        })?;
        let http = Client::new();

        Ok(Self {
            http: http.clone(),
            model: settings.model().clone(),
            backend: VideoBackend::vertex_ai(),
            endpoint: VeoEndpoint::Vertex {
                gcs: GcsClient::new(http, auth.clone()),
                auth,
                project,
                location: vertex.location().clone(),
                bucket: bare_bucket(&bucket).to_string(),
            },
        })
    }

    /// Build the client selected by the settings, discovering Vertex
    /// credentials when needed.
    pub async fn from_settings(settings: &VeoSettings) -> LuminaResult<Self> {
        if *settings.use_vertex() {
            let auth = VertexAuth::discover().await?;
            Self::vertex(settings, auth)
        } else {
            let api_key = settings.api_key().clone().ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::MissingCredentials("Veo".into()))
            })?;
            Ok(Self::ai_studio(api_key, settings.model().clone()))
        }
    }

    /// Model name.
    pub fn model_name(&self) -> &str {
        &self.model
    }

    /// Cloud Storage client of the Vertex backend.
    pub fn gcs(&self) -> Option<&GcsClient> {
        match &self.endpoint {
            VeoEndpoint::Vertex { gcs, .. } => Some(gcs),
            VeoEndpoint::AiStudio { .. } => None,
        }
    }

    fn parameters(&self) -> Value {
        let mut parameters = json!({
            "aspectRatio": "16:9",
            "resolution": "720p",
            "sampleCount": 1,
        });
        if let VeoEndpoint::Vertex { bucket, .. } = &self.endpoint {
            let id = Uuid::new_v4().simple().to_string();
            parameters["storageUri"] = json!(format!("gs://{}/video_{}/", bucket, &id[..8]));
        }
        parameters
    }

    /// Send an authenticated request to the backend.
    async fn send(&self, request: reqwest::RequestBuilder) -> LuminaResult<reqwest::Response> {
        let request = match &self.endpoint {
            VeoEndpoint::AiStudio { api_key } => request.header("x-goog-api-key", api_key),
            VeoEndpoint::Vertex { auth, .. } => request.bearer_auth(auth.bearer().await?),
        };
        request
            .send()
            .await
            .map_err(|e| {
                GenerationError::new(GenerationErrorKind::ApiRequest(e.to_string())).into()
            })
    }

    async fn submit(&self, instance: Value) -> LuminaResult<OperationHandle> {
        let url = match &self.endpoint {
            VeoEndpoint::AiStudio { .. } => {
                format!("{}/models/{}:predictLongRunning", AI_STUDIO_API, self.model)
            }
            VeoEndpoint::Vertex {
                project, location, ..
            } => format!(
                "{}:predictLongRunning",
                publisher_model_url(project, location, &self.model)
            ),
        };
        let body = json!({ "instances": [instance], "parameters": self.parameters() });

        let response = self.send(self.http.post(&url).json(&body)).await?;
        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| VideoError::new(VideoErrorKind::Start(e.to_string())))?;
        if !status.is_success() {
            return Err(VideoError::new(VideoErrorKind::Start(format!(
                "HTTP {}: {}",
                status, payload
            )))
            .into());
        }

        let name = payload
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                VideoError::new(VideoErrorKind::Start(format!(
                    "no operation name in {}",
                    payload
                )))
            })?;
        info!(operation = name, "Started video operation");
        Ok(OperationHandle::new(name))
    }

    /// Confirm the credentials can reach the model.
    #[instrument(skip(self), fields(model = %self.model))]
    pub async fn check_access(&self) -> LuminaResult<()> {
        let url = match &self.endpoint {
            VeoEndpoint::AiStudio { .. } => format!("{}/models/{}", AI_STUDIO_API, self.model),
            VeoEndpoint::Vertex { location, .. } => format!(
                "https://{}-aiplatform.googleapis.com/v1/publishers/google/models/{}",
                location, self.model
            ),
        };
        let response = self.send(self.http.get(&url)).await?;
        if !response.status().is_success() {
            let status_code = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(
                GenerationError::new(GenerationErrorKind::HttpStatus { status_code, message })
                    .into(),
            );
        }
        Ok(())
    }
}

#[async_trait]
impl VideoGenerator for VeoClient {
    fn backend(&self) -> &VideoBackend {
        &self.backend
    }

    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn start_video(&self, prompt: &str) -> LuminaResult<OperationHandle> {
        self.submit(json!({ "prompt": prompt })).await
    }

    #[instrument(skip(self, prompt), fields(model = %self.model, clip = %clip))]
    async fn start_extension(
        &self,
        clip: &ClipHandle,
        prompt: &str,
    ) -> LuminaResult<OperationHandle> {
        if !self.backend.supports_extension() {
            return Err(VideoError::new(VideoErrorKind::ExtensionUnsupported(
                self.backend.mode().to_string(),
            ))
            .into());
        }
        self.submit(json!({ "prompt": prompt, "video": { "uri": clip.uri } }))
            .await
    }

    #[instrument(skip(self), fields(operation = %operation))]
    async fn poll(&self, operation: &OperationHandle) -> LuminaResult<OperationStatus> {
        let request = match &self.endpoint {
            VeoEndpoint::AiStudio { .. } => {
                self.http.get(format!("{}/{}", AI_STUDIO_API, operation.name))
            }
            VeoEndpoint::Vertex {
                project, location, ..
            } => self
                .http
                .post(format!(
                    "{}:fetchPredictOperation",
                    publisher_model_url(project, location, &self.model)
                ))
                .json(&json!({ "operationName": operation.name })),
        };

        let poll_error = |message: String| {
            VideoError::new(VideoErrorKind::Poll {
                operation: operation.name.clone(),
                message,
            })
        };
        let response = self.send(request).await?;
        let status = response.status();
        let payload: Value = response
            .json()
            .await
            .map_err(|e| poll_error(e.to_string()))?;
        if !status.is_success() {
            return Err(poll_error(format!("HTTP {}: {}", status, payload)).into());
        }

        let state = operation_status(&payload);
        debug!(?state, "Polled video operation");
        Ok(state)
    }

    #[instrument(skip(self), fields(clip = %clip))]
    async fn download(&self, clip: &ClipHandle) -> LuminaResult<Vec<u8>> {
        let download_error = |message: String| {
            VideoError::new(VideoErrorKind::Download(format!("{}: {}", clip.uri, message)))
        };

        let bytes = match &self.endpoint {
            VeoEndpoint::Vertex { gcs, .. } => gcs
                .download(&clip.uri)
                .await
                .map_err(|e| download_error(e.to_string()))?,
            VeoEndpoint::AiStudio { .. } => {
                let response = self.send(self.http.get(&clip.uri)).await?;
                if !response.status().is_success() {
                    return Err(download_error(format!("HTTP {}", response.status())).into());
                }
                response
                    .bytes()
                    .await
                    .map_err(|e| download_error(e.to_string()))?
                    .to_vec()
            }
        };

        info!(size = bytes.len(), "Downloaded clip");
        Ok(bytes)
    }
}
