//! Text and image generation error types.

/// Generation failure conditions shared by every text and image provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// Credential not configured for the provider
    #[display("{} credentials not configured", _0)]
    MissingCredentials(String),
    /// Failed to construct the provider client
    #[display("Failed to create client: {}", _0)]
    ClientCreation(String),
    /// Failed to obtain an access token
    #[display("Authentication failed: {}", _0)]
    Authentication(String),
    /// Request could not be sent or its body could not be read
    #[display("API request failed: {}", _0)]
    ApiRequest(String),
    /// Provider answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    HttpStatus {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
    /// Provider answered without usable content
    #[display("Empty response from {}", _0)]
    EmptyResponse(String),
    /// Response payload had an unexpected shape
    #[display("Unexpected response: {}", _0)]
    UnexpectedResponse(String),
    /// Base64 payload could not be decoded
    #[display("Base64 decode error: {}", _0)]
    Base64Decode(String),
    /// Source content could not be extracted
    #[display("Content extraction failed: {}", _0)]
    Extraction(String),
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use lumina_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::EmptyResponse("gemini".into()));
/// assert!(format!("{}", err).contains("Empty response from gemini"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
