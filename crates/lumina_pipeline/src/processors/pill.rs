use crate::{
    ItemProcessor, clean_generated, infographic_prompt, pill_call_to_action_prompt,
    pill_short_text_prompt, pill_title_prompt,
    processor::{load_stored_text, require_text},
};
use async_trait::async_trait;
use lumina_core::{
    ArtifactKind, CallToAction, PillContent, ProcessingResult, SourceItem, derive_key,
    extract_title, file_stem, output_name,
};
use lumina_error::LuminaResult;
use lumina_interface::{ImageGenerator, ObjectStore, TextGenerator};
use std::sync::Arc;

/// Stored insight to knowledge pill.
///
/// Four text steps run in order (title, short text, call-to-action, image
/// prompt) followed by one image request. A failed text step fails the pill;
/// a missing image does not.
#[derive(Clone)]
pub struct PillProcessor {
    store: Arc<dyn ObjectStore>,
    text: Arc<dyn TextGenerator>,
    image: Arc<dyn ImageGenerator>,
    context: Option<Arc<str>>,
}

impl PillProcessor {
    /// Create a processor reading insights from `store`.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        text: Arc<dyn TextGenerator>,
        image: Arc<dyn ImageGenerator>,
    ) -> Self {
        Self {
            store,
            text,
            image,
            context: None,
        }
    }

    /// Consolidated insights appended to the short-text prompt.
    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context.map(Arc::from);
        self
    }

    fn key_for(item: &SourceItem, insight: Option<&str>) -> String {
        let title = insight.and_then(extract_title);
        let mut fallback = derive_key(file_stem(item.stored_key().unwrap_or_default()));
        if fallback.is_empty() {
            fallback = item.ordinal().to_string();
        }
        output_name(ArtifactKind::Pill, title.as_deref(), &fallback)
    }

    async fn ask(&self, prompt: &str, what: &str) -> LuminaResult<String> {
        let answer = self.text.generate(prompt).await?;
        require_text(clean_generated(&answer), what)
    }

    async fn generate(&self, insight: &str, key: &str) -> LuminaResult<PillContent> {
        tracing::debug!("Generating title");
        let title = self.ask(&pill_title_prompt(insight), "title").await?;

        tracing::debug!("Generating short text");
        let short_text = self
            .ask(
                &pill_short_text_prompt(insight, self.context.as_deref()),
                "short text",
            )
            .await?;

        tracing::debug!("Generating call-to-action");
        let question = self
            .ask(&pill_call_to_action_prompt(&short_text, &title), "call-to-action")
            .await?;

        tracing::debug!("Generating infographic");
        let infographic = self
            .image
            .generate_image(&infographic_prompt(&title, &short_text))
            .await;
        if infographic.is_none() {
            tracing::warn!(key = %key, "No infographic produced; keeping text-only pill");
        }

        let infographic_key = format!(
            "{}{}",
            file_stem(key),
            ArtifactKind::Infographic.extension()
        );
        Ok(PillContent::new(
            title,
            short_text,
            CallToAction::question(question),
            infographic,
            infographic_key,
        ))
    }
}

#[async_trait]
impl ItemProcessor for PillProcessor {
    type Output = PillContent;

    fn name(&self) -> &str {
        "pill"
    }

    async fn expected_key(&self, item: &SourceItem) -> Option<String> {
        match load_stored_text(self.store.as_ref(), item).await {
            Ok(insight) => Some(Self::key_for(item, Some(&insight))),
            Err(e) => {
                tracing::warn!(
                    source = %item,
                    error = %e,
                    "Insight unreadable; naming pill from file name"
                );
                Some(Self::key_for(item, None))
            }
        }
    }

    #[tracing::instrument(skip(self, item), fields(source = %item))]
    async fn process(&self, item: SourceItem) -> ProcessingResult<PillContent> {
        let insight = match load_stored_text(self.store.as_ref(), &item).await {
            Ok(insight) => insight,
            Err(e) => {
                let key = Self::key_for(&item, None);
                return ProcessingResult::failed(item, key, e.to_string());
            }
        };

        let key = Self::key_for(&item, Some(&insight));
        match self.generate(&insight, &key).await {
            Ok(content) => {
                let title = Some(content.title().clone());
                ProcessingResult::succeeded(item, title, key, content)
            }
            Err(e) => ProcessingResult::failed(item, key, e.to_string()),
        }
    }
}
