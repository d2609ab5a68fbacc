//! Source enumerators.

use async_trait::async_trait;
use lumina_core::{SourceHandle, SourceItem};
use lumina_error::{LuminaResult, PipelineError, PipelineErrorKind};
use lumina_interface::{ObjectStore, SourceEnumerator};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Parse a URL list: one URL per line, blank lines and `#` comments ignored.
///
/// # Examples
///
/// ```
/// use lumina_storage::parse_url_list;
///
/// let urls = parse_url_list("https://a.example\n\n# comment\n  https://b.example  \n");
/// assert_eq!(urls, vec!["https://a.example", "https://b.example"]);
/// ```
pub fn parse_url_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Sources read from a text file of URLs.
#[derive(Debug, Clone)]
pub struct UrlListSource {
    path: PathBuf,
}

impl UrlListSource {
    /// Enumerate the URLs listed in `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SourceEnumerator for UrlListSource {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn list_sources(&self) -> LuminaResult<Vec<SourceItem>> {
        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            PipelineError::new(PipelineErrorKind::SourceListing(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        let items: Vec<SourceItem> = parse_url_list(&contents)
            .into_iter()
            .enumerate()
            .map(|(idx, url)| SourceItem::new(idx + 1, SourceHandle::Url(url)))
            .collect();

        info!(count = items.len(), "Loaded source URLs");
        Ok(items)
    }
}

/// Sources read from documents stored in a scope.
pub struct StoredDocumentSource {
    store: Arc<dyn ObjectStore>,
    scope: String,
    extension: String,
    excluded: Vec<String>,
}

impl StoredDocumentSource {
    /// Enumerate keys of `scope` ending in `extension`, in key order.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        scope: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            store,
            scope: scope.into(),
            extension: extension.into(),
            excluded: Vec::new(),
        }
    }

    /// Skip a key even when it matches the extension.
    pub fn excluding(mut self, key: impl Into<String>) -> Self {
        self.excluded.push(key.into());
        self
    }
}

#[async_trait]
impl SourceEnumerator for StoredDocumentSource {
    #[tracing::instrument(skip(self), fields(scope = %self.scope))]
    async fn list_sources(&self) -> LuminaResult<Vec<SourceItem>> {
        let mut keys = match self.store.list(&self.scope).await {
            Ok(keys) => keys,
            Err(e) if e.is_missing_scope() => {
                info!(scope = %self.scope, "Source scope does not exist yet");
                Vec::new()
            }
            Err(e) => {
                warn!(scope = %self.scope, error = %e, "Failed to list source documents");
                Vec::new()
            }
        };
        keys.retain(|key| key.ends_with(&self.extension) && !self.excluded.contains(key));
        keys.sort();

        let items: Vec<SourceItem> = keys
            .into_iter()
            .enumerate()
            .map(|(idx, key)| {
                SourceItem::new(
                    idx + 1,
                    SourceHandle::Stored {
                        scope: self.scope.clone(),
                        key,
                    },
                )
            })
            .collect();

        info!(scope = %self.scope, count = items.len(), "Found source documents");
        Ok(items)
    }
}
