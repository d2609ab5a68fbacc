//! Pipeline error types.

/// Specific error conditions for pipeline orchestration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Source items could not be enumerated
    #[display("Failed to list sources: {}", _0)]
    SourceListing(String),
    /// Source content could not be loaded
    #[display("Failed to load source '{}': {}", source_ref, message)]
    SourceLoad {
        /// Source reference
        source_ref: String,
        /// Failure detail
        message: String,
    },
    /// A worker task ended abnormally
    #[display("Worker task failed: {}", _0)]
    Worker(String),
    /// The generated content was unusable
    #[display("Generated {} was empty", _0)]
    EmptyContent(String),
    /// Pre-flight validation rejected the configuration
    #[display("Pre-flight validation failed: {}", _0)]
    Preflight(String),
}

/// Pipeline error with location tracking.
///
/// # Examples
///
/// ```
/// use lumina_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::EmptyContent("short text".into()));
/// assert!(format!("{}", err).contains("Generated short text was empty"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The kind of error that occurred
    pub kind: PipelineErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new pipeline error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
