//! Capability traits implemented by external collaborators.

use crate::{ClipHandle, OperationHandle, OperationStatus, VideoBackend};
use async_trait::async_trait;
use lumina_core::SourceItem;
use lumina_error::LuminaResult;

/// Text completion from a single prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the prompt.
    async fn generate(&self, prompt: &str) -> LuminaResult<String>;

    /// Provider name (e.g., "gemini", "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gemini-2.5-flash").
    fn model_name(&self) -> &str;
}

/// Still-image synthesis.
///
/// Implementations swallow their own failures: `None` means no image was
/// produced, which callers must treat as non-fatal.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate PNG bytes for the prompt.
    async fn generate_image(&self, prompt: &str) -> Option<Vec<u8>>;
}

/// Long-running video synthesis.
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Capability descriptor of the backend.
    fn backend(&self) -> &VideoBackend;

    /// Start generating a new clip from a prompt.
    async fn start_video(&self, prompt: &str) -> LuminaResult<OperationHandle>;

    /// Start extending an existing clip with a new prompt.
    async fn start_extension(
        &self,
        clip: &ClipHandle,
        prompt: &str,
    ) -> LuminaResult<OperationHandle>;

    /// Check the state of a running operation.
    async fn poll(&self, operation: &OperationHandle) -> LuminaResult<OperationStatus>;

    /// Fetch the bytes of a finished clip.
    async fn download(&self, clip: &ClipHandle) -> LuminaResult<Vec<u8>>;
}

/// Scoped object storage (buckets or directories).
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Backend name for logging (e.g., "s3", "filesystem").
    fn backend_name(&self) -> &'static str;

    /// Create the scope if it does not exist.
    async fn ensure_scope(&self, scope: &str) -> LuminaResult<()>;

    /// List every key in a scope.
    ///
    /// A missing scope is reported as a `ScopeNotFound` storage error.
    async fn list(&self, scope: &str) -> LuminaResult<Vec<String>>;

    /// Read an object.
    async fn get(&self, scope: &str, key: &str) -> LuminaResult<Vec<u8>>;

    /// Write an object, replacing any previous value.
    async fn put(
        &self,
        scope: &str,
        key: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> LuminaResult<()>;

    /// Delete every object in a scope, returning how many were removed.
    async fn wipe(&self, scope: &str) -> LuminaResult<usize>;

    /// Read an object as UTF-8 text, replacing invalid sequences.
    async fn get_text(&self, scope: &str, key: &str) -> LuminaResult<String> {
        let bytes = self.get(scope, key).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Enumeration of the raw inputs of a stage.
#[async_trait]
pub trait SourceEnumerator: Send + Sync {
    /// List the source items, numbered from 1.
    async fn list_sources(&self) -> LuminaResult<Vec<SourceItem>>;
}

/// Plain-text extraction from a web page.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Fetch the page and return its readable text.
    async fn extract(&self, url: &str) -> LuminaResult<String>;
}
