//! Per-item processing results.

use crate::SourceItem;
use serde::Serialize;

/// Outcome of processing one source item.
///
/// A result either carries generated content or an error message, never
/// both: failed results have no content and a non-empty error.
///
/// # Examples
///
/// ```
/// use lumina_core::{ProcessingResult, SourceHandle, SourceItem};
///
/// let item = SourceItem::new(2, SourceHandle::Url("https://example.org".into()));
/// let failed: ProcessingResult<String> =
///     ProcessingResult::failed(item, "topico_2.md", "upstream timeout");
///
/// assert!(!failed.is_success());
/// assert!(failed.content().is_none());
/// assert_eq!(failed.error(), Some("upstream timeout"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingResult<T> {
    source: SourceItem,
    title: Option<String>,
    output_key: String,
    content: Option<T>,
    error: Option<String>,
}

impl<T> ProcessingResult<T> {
    /// Result carrying generated content.
    pub fn succeeded(
        source: SourceItem,
        title: Option<String>,
        output_key: impl Into<String>,
        content: T,
    ) -> Self {
        Self {
            source,
            title,
            output_key: output_key.into(),
            content: Some(content),
            error: None,
        }
    }

    /// Result recording a failure. An empty message is replaced so the
    /// error is always non-empty.
    pub fn failed(
        source: SourceItem,
        output_key: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let mut error = error.into();
        if error.trim().is_empty() {
            error = "unknown error".to_string();
        }
        Self {
            source,
            title: None,
            output_key: output_key.into(),
            content: None,
            error: Some(error),
        }
    }

    /// Whether generation succeeded.
    pub fn is_success(&self) -> bool {
        self.content.is_some()
    }

    /// Source item the result was produced from.
    pub fn source(&self) -> &SourceItem {
        &self.source
    }

    /// Title derived from the generated content, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Key the artifact is persisted under.
    pub fn output_key(&self) -> &str {
        &self.output_key
    }

    /// Generated content of a successful result.
    pub fn content(&self) -> Option<&T> {
        self.content.as_ref()
    }

    /// Error message of a failed result.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
