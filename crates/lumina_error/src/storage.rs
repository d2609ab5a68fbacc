//! Storage error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// The scope (bucket or directory) does not exist
    #[display("Scope not found: {}", _0)]
    ScopeNotFound(String),
    /// No object stored under the key
    #[display("Object not found: {}/{}", scope, key)]
    ObjectNotFound {
        /// Scope that was searched
        scope: String,
        /// Missing key
        key: String,
    },
    /// Failed to create a scope
    #[display("Failed to create scope: {}", _0)]
    ScopeCreation(String),
    /// Failed to write an object
    #[display("Failed to write object: {}", _0)]
    Write(String),
    /// Failed to read an object
    #[display("Failed to read object: {}", _0)]
    Read(String),
    /// Failed to list a scope
    #[display("Failed to list scope: {}", _0)]
    List(String),
    /// Failed to delete objects
    #[display("Failed to delete objects: {}", _0)]
    Delete(String),
    /// Key is not a plain object name
    #[display("Invalid object key: {}", _0)]
    InvalidKey(String),
    /// Invalid storage configuration
    #[display("Invalid configuration: {}", _0)]
    InvalidConfig(String),
    /// Storage backend is unavailable
    #[display("Storage unavailable: {}", _0)]
    Unavailable(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use lumina_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::ScopeNotFound("insights".to_string()));
/// assert!(err.is_missing_scope());
/// assert!(format!("{}", err).contains("Scope not found"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// True when the error reports a scope that does not exist yet.
    pub fn is_missing_scope(&self) -> bool {
        matches!(self.kind, StorageErrorKind::ScopeNotFound(_))
    }

    /// True when the error reports a missing object.
    pub fn is_missing_object(&self) -> bool {
        matches!(self.kind, StorageErrorKind::ObjectNotFound { .. })
    }
}
