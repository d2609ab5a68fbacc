//! Value types exchanged with video backends.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Handle of a long-running operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", name)]
pub struct OperationHandle {
    /// Operation resource name
    pub name: String,
}

impl OperationHandle {
    /// Wrap an operation name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Handle of a finished clip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[display("{}", uri)]
pub struct ClipHandle {
    /// Location of the clip (file URI or `gs://` URI)
    pub uri: String,
    /// MIME type reported by the backend
    pub mime_type: Option<String>,
}

impl ClipHandle {
    /// Clip at the given URI.
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: None,
        }
    }
}

/// State of a polled operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    /// Still running
    Pending,
    /// Finished with a clip
    Done(ClipHandle),
    /// Finished with an error
    Error(String),
}

/// Backend family serving video generation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum VideoBackendMode {
    /// Google AI Studio, authenticated with an API key
    #[display("ai_studio")]
    AiStudio,
    /// Vertex AI, authenticated with a service account
    #[display("vertex_ai")]
    VertexAi,
}

/// Capability descriptor consumed by the video state machine.
///
/// # Examples
///
/// ```
/// use lumina_interface::VideoBackend;
/// use std::time::Duration;
///
/// let backend = VideoBackend::vertex_ai();
/// assert!(!backend.supports_extension());
/// assert_eq!(backend.clip_duration(), &Duration::from_secs(8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Getters)]
pub struct VideoBackend {
    /// Backend family
    mode: VideoBackendMode,
    /// Whether clips can be chained with extensions
    #[getter(skip)]
    supports_extension: bool,
    /// Fixed duration of one generated clip
    clip_duration: Duration,
}

impl VideoBackend {
    /// Duration of every Veo clip.
    pub const CLIP_DURATION: Duration = Duration::from_secs(8);

    /// Descriptor with explicit capabilities.
    pub fn new(mode: VideoBackendMode, supports_extension: bool, clip_duration: Duration) -> Self {
        Self {
            mode,
            supports_extension,
            clip_duration,
        }
    }

    /// AI Studio: extensions supported.
    pub fn ai_studio() -> Self {
        Self::new(VideoBackendMode::AiStudio, true, Self::CLIP_DURATION)
    }

    /// Vertex AI: single clips only.
    pub fn vertex_ai() -> Self {
        Self::new(VideoBackendMode::VertexAi, false, Self::CLIP_DURATION)
    }

    /// Whether clips can be chained with extensions.
    pub fn supports_extension(&self) -> bool {
        self.supports_extension
    }

    /// Extension count actually usable with this backend.
    pub fn effective_extensions(&self, requested: usize) -> usize {
        if self.supports_extension { requested } else { 0 }
    }

    /// Nominal duration of a video made of an initial clip plus extensions.
    pub fn total_duration(&self, extensions_completed: usize) -> Duration {
        self.clip_duration * (extensions_completed as u32 + 1)
    }
}
