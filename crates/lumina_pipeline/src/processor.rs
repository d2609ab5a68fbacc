//! The per-item processor contract.

use async_trait::async_trait;
use lumina_core::{ProcessingResult, SourceItem};
use lumina_error::{LuminaResult, PipelineError, PipelineErrorKind};
use lumina_interface::ObjectStore;

/// Turns one source item into one generated artifact.
///
/// `process` never fails: every error raised while generating is captured
/// in a failed [`ProcessingResult`], so one item cannot abort a run.
#[async_trait]
pub trait ItemProcessor: Send + Sync {
    /// Generated content carried by successful results.
    type Output: Send + 'static;

    /// Stage name used in logs.
    fn name(&self) -> &str;

    /// Key the item's artifact will be stored under, when it can be known
    /// before generation. `None` means the item is always processed.
    async fn expected_key(&self, item: &SourceItem) -> Option<String>;

    /// Generate the artifact for one item.
    async fn process(&self, item: SourceItem) -> ProcessingResult<Self::Output>;
}

/// Load the text of a stored source document.
///
/// Empty documents are rejected since every prompt needs content.
pub(crate) async fn load_stored_text(
    store: &dyn ObjectStore,
    item: &SourceItem,
) -> LuminaResult<String> {
    let lumina_core::SourceHandle::Stored { scope, key } = item.handle() else {
        return Err(PipelineError::new(PipelineErrorKind::SourceLoad {
            source_ref: item.to_string(),
            message: "expected a stored document".to_string(),
        })
        .into());
    };

    let text = store.get_text(scope, key).await?;
    if text.trim().is_empty() {
        return Err(PipelineError::new(PipelineErrorKind::SourceLoad {
            source_ref: item.to_string(),
            message: "document is empty".to_string(),
        })
        .into());
    }
    Ok(text)
}

/// Reject blank generated text.
pub(crate) fn require_text(text: String, what: &str) -> LuminaResult<String> {
    if text.trim().is_empty() {
        Err(PipelineError::new(PipelineErrorKind::EmptyContent(what.to_string())).into())
    } else {
        Ok(text)
    }
}
