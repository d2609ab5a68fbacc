use crate::{ItemProcessor, insight_prompt, processor::require_text};
use async_trait::async_trait;
use lumina_core::{
    ArtifactKind, ProcessingResult, SourceHandle, SourceItem, extract_title, output_name,
};
use lumina_error::{LuminaResult, PipelineError, PipelineErrorKind};
use lumina_interface::{ContentExtractor, TextGenerator};
use std::sync::Arc;

/// Scraped page to markdown insight.
///
/// The key comes from the insight's own `# ` heading, so it is only known
/// after generation; pages without a heading are named by their ordinal.
#[derive(Clone)]
pub struct InsightProcessor {
    extractor: Arc<dyn ContentExtractor>,
    generator: Arc<dyn TextGenerator>,
}

impl InsightProcessor {
    /// Create a processor from its capabilities.
    pub fn new(extractor: Arc<dyn ContentExtractor>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            extractor,
            generator,
        }
    }

    fn fallback_key(item: &SourceItem) -> String {
        output_name(ArtifactKind::Insight, None, &item.ordinal().to_string())
    }

    async fn generate(&self, item: &SourceItem) -> LuminaResult<(Option<String>, String)> {
        let SourceHandle::Url(url) = item.handle() else {
            return Err(PipelineError::new(PipelineErrorKind::SourceLoad {
                source_ref: item.to_string(),
                message: "insight sources must be URLs".to_string(),
            })
            .into());
        };

        let raw = self.extractor.extract(url).await?;
        let raw = require_text(raw, "page text")?;
        tracing::debug!(url = %url, chars = raw.chars().count(), "Extracted page text");

        let markdown = self.generator.generate(&insight_prompt(url, &raw)).await?;
        let markdown = require_text(markdown, "insight")?;
        Ok((extract_title(&markdown), markdown))
    }
}

#[async_trait]
impl ItemProcessor for InsightProcessor {
    type Output = String;

    fn name(&self) -> &str {
        "insight"
    }

    async fn expected_key(&self, _item: &SourceItem) -> Option<String> {
        None
    }

    #[tracing::instrument(skip(self, item), fields(source = %item, ordinal = item.ordinal()))]
    async fn process(&self, item: SourceItem) -> ProcessingResult<String> {
        match self.generate(&item).await {
            Ok((title, markdown)) => {
                let fallback = item.ordinal().to_string();
                let key = output_name(ArtifactKind::Insight, title.as_deref(), &fallback);
                ProcessingResult::succeeded(item, title, key, markdown)
            }
            Err(e) => {
                let key = Self::fallback_key(&item);
                ProcessingResult::failed(item, key, e.to_string())
            }
        }
    }
}
