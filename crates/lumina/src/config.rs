//! Application configuration.
//!
//! Settings are layered, later sources overriding earlier ones:
//!
//! 1. Bundled defaults (`config/defaults.toml`)
//! 2. An optional `./lumina.toml`
//! 3. Environment variables, after `.env` has been loaded
//!
//! Keys are the lower-cased environment variable names, so `MAX_WORKERS=8`
//! and `max_workers = 8` in `lumina.toml` set the same value.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use lumina_error::{ConfigError, LuminaError, LuminaResult};
use lumina_models::{AiProvider, ImagenSettings, TextSettings, VeoSettings, VertexSettings};
use lumina_pipeline::OrchestratorConfig;
use lumina_storage::S3StoreConfig;
use lumina_video::ChainConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_CONFIG: &str = include_str!("../config/defaults.toml");

/// Every setting the binaries read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct LuminaConfig {
    /// S3-compatible endpoint URL
    #[serde(rename = "minio_endpoint")]
    store_endpoint: String,
    /// Store access key
    #[serde(rename = "minio_access_key")]
    store_access_key: String,
    /// Store secret key
    #[serde(rename = "minio_secret_key")]
    store_secret_key: String,
    /// Store signing region
    #[serde(rename = "minio_region")]
    store_region: String,
    /// Scope holding insights
    #[serde(rename = "minio_bucket_name_insights")]
    insight_scope: String,
    /// Scope holding video scripts
    #[serde(rename = "minio_bucket_name_roteiros")]
    script_scope: String,
    /// Scope holding videos
    #[serde(rename = "minio_bucket_name")]
    video_scope: String,
    /// Scope holding pill documents
    #[serde(rename = "minio_bucket_pilulas")]
    pill_scope: String,
    /// Scope holding infographics
    #[serde(rename = "minio_bucket_infograficos")]
    infographic_scope: String,
    /// Use the S3 store; otherwise write under `local_output_dir`
    #[serde(rename = "save_on_minio")]
    use_object_store: bool,
    /// Root of the filesystem store
    local_output_dir: PathBuf,
    /// Empty the insight scope before scraping
    #[serde(rename = "wipe_bucket_before_start")]
    wipe_insights: bool,

    /// Text provider name
    ai_provider: String,
    /// Gemini API key
    #[serde(default)]
    gemini_api_key: Option<String>,
    /// Gemini model
    #[serde(rename = "genai_model_name")]
    gemini_model: String,
    /// OpenAI-compatible API base URL
    openai_host: String,
    /// OpenAI API key
    #[serde(default)]
    openai_key: Option<String>,
    /// OpenAI model
    #[serde(rename = "openai_model_name")]
    openai_model: String,

    /// AI Studio key for Veo
    #[serde(default)]
    veo_api_key: Option<String>,
    /// Veo model
    #[serde(rename = "veo_model_name")]
    veo_model: String,
    /// Generate videos on Vertex AI
    #[serde(rename = "veo_use_vertex_ai")]
    use_vertex: bool,
    /// Google Cloud project
    #[serde(default)]
    vertex_project: Option<String>,
    /// Vertex region
    vertex_location: String,
    /// Bucket receiving Vertex video output
    #[serde(default)]
    vertex_gcs_bucket: Option<String>,
    /// Imagen model
    #[serde(rename = "imagen_model_name")]
    imagen_model: String,
    /// Seconds between video operation polls
    veo_poll_interval_secs: u64,
    /// Longest wait for one video operation, in seconds
    #[serde(default)]
    veo_deadline_secs: Option<u64>,

    /// Concurrent items per stage
    max_workers: usize,
    /// Skip script generation in the video binary
    #[serde(rename = "skip_roteiro_generation")]
    skip_scripts: bool,
    /// Videos per run, 0 for unlimited
    max_videos_per_run: usize,
    /// Extensions chained after the first clip
    veo_extensions: usize,
    /// Scenes requested per script
    #[serde(rename = "roteiro_num_scenes")]
    scene_count: usize,
    /// Skip pill generation
    #[serde(rename = "skip_pill_generation")]
    skip_pills: bool,
    /// Pills per run, 0 for unlimited
    max_pills_per_run: usize,
    /// File listing source URLs
    sources_file: PathBuf,

    /// Service name used in logs and traces
    app_name: String,
    /// Deployment environment label
    app_env: String,
    /// Default log filter
    log_level: String,
    /// `text` or `json`
    log_format: String,
}

fn config_error(context: &str, e: config::ConfigError) -> LuminaError {
    LuminaError::from(ConfigError::new(format!("{}: {}", context, e)))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn limit(value: usize) -> Option<usize> {
    (value > 0).then_some(value)
}

impl LuminaConfig {
    /// Load `.env`, then the layered configuration from the process environment.
    #[instrument]
    pub fn load() -> LuminaResult<Self> {
        match dotenvy::dotenv() {
            Ok(path) => debug!(path = %path.display(), "Loaded .env"),
            Err(e) if e.not_found() => debug!("No .env file"),
            Err(e) => {
                return Err(ConfigError::new(format!("Failed to read .env: {}", e)).into());
            }
        }
        Self::from_sources(Some(Path::new("lumina")), None)
    }

    /// Load the layered configuration.
    ///
    /// `file` is an optional config file (extension may be omitted).
    /// `env` replaces the process environment when given, which keeps tests
    /// independent of the host.
    pub fn from_sources(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> LuminaResult<Self> {
        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));
        if let Some(file) = file {
            builder = builder.add_source(File::from(file).required(false));
        }
        builder = builder
            .add_source(Environment::default().source(env.map(|vars| vars.into_iter().collect())));

        let config: Self = builder
            .build()
            .map_err(|e| config_error("Failed to build configuration", e))?
            .try_deserialize()
            .map_err(|e| config_error("Failed to parse configuration", e))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> LuminaResult<()> {
        self.provider()?;
        if self.veo_poll_interval_secs == 0 {
            return Err(ConfigError::new("VEO_POLL_INTERVAL_SECS must be positive").into());
        }
        if self.scene_count == 0 {
            return Err(ConfigError::new("ROTEIRO_NUM_SCENES must be positive").into());
        }
        if !matches!(self.log_format.to_lowercase().as_str(), "text" | "json") {
            return Err(ConfigError::new(format!(
                "LOG_FORMAT must be text or json, got {}",
                self.log_format
            ))
            .into());
        }
        Ok(())
    }

    /// Selected text provider.
    pub fn provider(&self) -> LuminaResult<AiProvider> {
        self.ai_provider
            .parse::<AiProvider>()
            .map_err(|e| ConfigError::new(e).into())
    }

    /// Whether logs are emitted as JSON.
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Video cap, `None` when unlimited.
    pub fn max_videos(&self) -> Option<usize> {
        limit(self.max_videos_per_run)
    }

    /// Pill cap, `None` when unlimited.
    pub fn max_pills(&self) -> Option<usize> {
        limit(self.max_pills_per_run)
    }

    /// AI Studio key for Veo, falling back to the Gemini key.
    pub fn effective_veo_api_key(&self) -> Option<String> {
        non_empty(&self.veo_api_key).or_else(|| non_empty(&self.gemini_api_key))
    }

    /// Text provider settings.
    pub fn text_settings(&self) -> LuminaResult<TextSettings> {
        TextSettings::builder()
            .provider(self.provider()?)
            .gemini_api_key(non_empty(&self.gemini_api_key))
            .gemini_model(self.gemini_model.clone())
            .openai_host(self.openai_host.clone())
            .openai_key(non_empty(&self.openai_key))
            .openai_model(self.openai_model.clone())
            .build()
            .map_err(|e| ConfigError::new(e.to_string()).into())
    }

    /// Vertex AI coordinates shared by Veo and Imagen.
    pub fn vertex_settings(&self) -> LuminaResult<VertexSettings> {
        VertexSettings::builder()
            .project(non_empty(&self.vertex_project))
            .location(self.vertex_location.clone())
            .gcs_bucket(non_empty(&self.vertex_gcs_bucket))
            .build()
            .map_err(|e| ConfigError::new(e.to_string()).into())
    }

    /// Veo settings.
    pub fn veo_settings(&self) -> LuminaResult<VeoSettings> {
        VeoSettings::builder()
            .use_vertex(self.use_vertex)
            .api_key(self.effective_veo_api_key())
            .model(self.veo_model.clone())
            .vertex(self.vertex_settings()?)
            .build()
            .map_err(|e| ConfigError::new(e.to_string()).into())
    }

    /// Imagen settings.
    pub fn imagen_settings(&self) -> LuminaResult<ImagenSettings> {
        ImagenSettings::builder()
            .model(self.imagen_model.clone())
            .vertex(self.vertex_settings()?)
            .build()
            .map_err(|e| ConfigError::new(e.to_string()).into())
    }

    /// S3 connection settings.
    pub fn s3_settings(&self) -> LuminaResult<S3StoreConfig> {
        S3StoreConfig::builder()
            .endpoint(self.store_endpoint.clone())
            .access_key(self.store_access_key.clone())
            .secret_key(self.store_secret_key.clone())
            .region(self.store_region.clone())
            .build()
            .map_err(|e| ConfigError::new(e.to_string()).into())
    }

    /// Worker pool settings for a stage with an optional cap.
    pub fn orchestrator(&self, max_items: Option<usize>) -> LuminaResult<OrchestratorConfig> {
        OrchestratorConfig::builder()
            .worker_count(self.max_workers)
            .max_items(max_items)
            .build()
            .map_err(|e| ConfigError::new(e.to_string()).into())
    }

    /// Video chain settings.
    pub fn chain(&self) -> LuminaResult<ChainConfig> {
        ChainConfig::builder()
            .extensions(self.veo_extensions)
            .poll_interval(Duration::from_secs(self.veo_poll_interval_secs))
            .deadline(self.veo_deadline_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| ConfigError::new(e.to_string()).into())
    }
}
