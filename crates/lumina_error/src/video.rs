//! Video generation error types.

/// Failure conditions of the long-running video operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum VideoErrorKind {
    /// The backend refused to start an operation
    #[display("Failed to start video operation: {}", _0)]
    Start(String),
    /// Polling the operation failed
    #[display("Failed to poll operation {}: {}", operation, message)]
    Poll {
        /// Operation name
        operation: String,
        /// Failure detail
        message: String,
    },
    /// The operation finished with an error
    #[display("Video operation failed: {}", _0)]
    OperationFailed(String),
    /// The operation finished without producing a clip
    #[display("Operation {} finished without a clip", _0)]
    MissingClip(String),
    /// The backend cannot extend clips
    #[display("Backend '{}' does not support clip extension", _0)]
    ExtensionUnsupported(String),
    /// Clip bytes could not be downloaded
    #[display("Failed to download clip: {}", _0)]
    Download(String),
    /// The polling deadline elapsed
    #[display("Operation {} exceeded its {}s deadline", operation, seconds)]
    DeadlineExceeded {
        /// Operation name
        operation: String,
        /// Deadline in seconds
        seconds: u64,
    },
    /// The run was cancelled while waiting
    #[display("Video generation cancelled")]
    Cancelled,
}

/// Video error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Video Error: {} at line {} in {}", kind, line, file)]
pub struct VideoError {
    /// The kind of error that occurred
    pub kind: VideoErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl VideoError {
    /// Create a new video error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: VideoErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
