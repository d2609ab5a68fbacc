//! Persistence of successful results.

use async_trait::async_trait;
use chrono::Utc;
use lumina_core::{ArtifactKind, PillContent, ProcessingResult, file_stem};
use lumina_error::{JsonError, LuminaResult};
use lumina_interface::ObjectStore;
use std::sync::Arc;

/// Destination of one stage's generated artifacts.
#[async_trait]
pub trait ResultSink<T>: Send + Sync {
    /// Prepare the destination before the first write.
    async fn prepare(&self) -> LuminaResult<()> {
        Ok(())
    }

    /// Persist the content of one successful result.
    async fn persist(&self, result: &ProcessingResult<T>, content: &T) -> LuminaResult<()>;
}

/// Writes markdown results (insights, scripts) into one scope.
#[derive(Clone)]
pub struct MarkdownSink {
    store: Arc<dyn ObjectStore>,
    scope: String,
    kind: ArtifactKind,
}

impl MarkdownSink {
    /// Sink writing `kind` artifacts into `scope`.
    pub fn new(store: Arc<dyn ObjectStore>, scope: impl Into<String>, kind: ArtifactKind) -> Self {
        Self {
            store,
            scope: scope.into(),
            kind,
        }
    }
}

#[async_trait]
impl ResultSink<String> for MarkdownSink {
    async fn prepare(&self) -> LuminaResult<()> {
        self.store.ensure_scope(&self.scope).await
    }

    #[tracing::instrument(skip_all, fields(scope = %self.scope, key = result.output_key()))]
    async fn persist(
        &self,
        result: &ProcessingResult<String>,
        content: &String,
    ) -> LuminaResult<()> {
        self.store
            .put(
                &self.scope,
                result.output_key(),
                content.as_bytes().to_vec(),
                self.kind.content_type(),
            )
            .await?;
        tracing::info!(kind = %self.kind, "Saved {}", result.output_key());
        Ok(())
    }
}

/// Writes pill JSON documents and their infographics.
#[derive(Clone)]
pub struct PillSink {
    store: Arc<dyn ObjectStore>,
    pill_scope: String,
    infographic_scope: String,
}

impl PillSink {
    /// Sink writing pills to `pill_scope` and images to `infographic_scope`.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        pill_scope: impl Into<String>,
        infographic_scope: impl Into<String>,
    ) -> Self {
        Self {
            store,
            pill_scope: pill_scope.into(),
            infographic_scope: infographic_scope.into(),
        }
    }
}

#[async_trait]
impl ResultSink<PillContent> for PillSink {
    async fn prepare(&self) -> LuminaResult<()> {
        self.store.ensure_scope(&self.pill_scope).await?;
        self.store.ensure_scope(&self.infographic_scope).await
    }

    #[tracing::instrument(skip_all, fields(key = result.output_key()))]
    async fn persist(
        &self,
        result: &ProcessingResult<PillContent>,
        content: &PillContent,
    ) -> LuminaResult<()> {
        let key = result.output_key();
        let source_insight = result
            .source()
            .stored_key()
            .map(str::to_string)
            .unwrap_or_else(|| result.source().to_string());
        let document = content.to_document(file_stem(key), source_insight, Utc::now());
        let json = serde_json::to_vec_pretty(&document)
            .map_err(|e| JsonError::new(format!("Failed to serialize pill {}: {}", key, e)))?;

        self.store
            .put(&self.pill_scope, key, json, ArtifactKind::Pill.content_type())
            .await?;
        tracing::info!("Saved pill {}", key);

        if let Some(image) = content.infographic() {
            match self
                .store
                .put(
                    &self.infographic_scope,
                    content.infographic_key(),
                    image.clone(),
                    ArtifactKind::Infographic.content_type(),
                )
                .await
            {
                Ok(()) => tracing::info!("Saved infographic {}", content.infographic_key()),
                Err(e) => tracing::warn!(
                    error = %e,
                    "Pill saved without its infographic {}",
                    content.infographic_key()
                ),
            }
        }
        Ok(())
    }
}
