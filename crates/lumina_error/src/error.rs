//! Top-level error wrapper types.

use crate::{
    ConfigError, GenerationError, HttpError, JsonError, PipelineError, StorageError, VideoError,
};

/// Every error the pipeline can surface.
///
/// # Examples
///
/// ```
/// use lumina_error::{LuminaError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: LuminaError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum LuminaErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Object store error
    #[from(StorageError)]
    Storage(StorageError),
    /// Text or image generation error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Video operation error
    #[from(VideoError)]
    Video(VideoError),
    /// Orchestration error
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Lumina error with kind discrimination.
///
/// # Examples
///
/// ```
/// use lumina_error::{LuminaError, LuminaResult, ConfigError};
///
/// fn might_fail() -> LuminaResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Lumina Error: {}", _0)]
pub struct LuminaError(Box<LuminaErrorKind>);

impl LuminaError {
    /// Create a new error from a kind.
    pub fn new(kind: LuminaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LuminaErrorKind {
        &self.0
    }

    /// True when the underlying storage error reports a missing scope.
    pub fn is_missing_scope(&self) -> bool {
        matches!(self.kind(), LuminaErrorKind::Storage(e) if e.is_missing_scope())
    }

    /// True when the underlying storage error reports a missing object.
    pub fn is_missing_object(&self) -> bool {
        matches!(self.kind(), LuminaErrorKind::Storage(e) if e.is_missing_object())
    }
}

// Generic From implementation for any type that converts to LuminaErrorKind
impl<T> From<T> for LuminaError
where
    T: Into<LuminaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Lumina operations.
pub type LuminaResult<T> = std::result::Result<T, LuminaError>;
