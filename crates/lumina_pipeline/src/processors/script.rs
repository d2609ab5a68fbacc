use crate::{
    ItemProcessor,
    processor::{load_stored_text, require_text},
    script_prompt,
};
use async_trait::async_trait;
use lumina_core::{
    ArtifactKind, ProcessingResult, SourceItem, extract_title, file_stem, output_name,
};
use lumina_error::LuminaResult;
use lumina_interface::{ObjectStore, TextGenerator};
use std::sync::Arc;

/// Stored insight to multi-scene video script.
///
/// Scripts are named after the insight's title, falling back to the insight
/// file stem, so the key is known before generation.
#[derive(Clone)]
pub struct ScriptProcessor {
    store: Arc<dyn ObjectStore>,
    generator: Arc<dyn TextGenerator>,
    context: Option<Arc<str>>,
    scene_count: usize,
}

impl ScriptProcessor {
    /// Create a processor reading insights from `store`.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        generator: Arc<dyn TextGenerator>,
        scene_count: usize,
    ) -> Self {
        Self {
            store,
            generator,
            context: None,
            scene_count,
        }
    }

    /// Consolidated insights appended to every prompt.
    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context.map(Arc::from);
        self
    }

    fn key_for(item: &SourceItem, insight: Option<&str>) -> String {
        let title = insight.and_then(extract_title);
        let fallback = file_stem(item.stored_key().unwrap_or_default());
        let fallback = if fallback.is_empty() {
            item.ordinal().to_string()
        } else {
            fallback.to_string()
        };
        output_name(ArtifactKind::Script, title.as_deref(), &fallback)
    }

    async fn generate(&self, insight: &str) -> LuminaResult<String> {
        let prompt = script_prompt(insight, self.context.as_deref(), self.scene_count);
        require_text(self.generator.generate(&prompt).await?, "script")
    }
}

#[async_trait]
impl ItemProcessor for ScriptProcessor {
    type Output = String;

    fn name(&self) -> &str {
        "script"
    }

    async fn expected_key(&self, item: &SourceItem) -> Option<String> {
        match load_stored_text(self.store.as_ref(), item).await {
            Ok(insight) => Some(Self::key_for(item, Some(&insight))),
            Err(e) => {
                tracing::warn!(
                    source = %item,
                    error = %e,
                    "Insight unreadable; naming script from file name"
                );
                Some(Self::key_for(item, None))
            }
        }
    }

    #[tracing::instrument(skip(self, item), fields(source = %item, scenes = self.scene_count))]
    async fn process(&self, item: SourceItem) -> ProcessingResult<String> {
        let insight = match load_stored_text(self.store.as_ref(), &item).await {
            Ok(insight) => insight,
            Err(e) => {
                let key = Self::key_for(&item, None);
                return ProcessingResult::failed(item, key, e.to_string());
            }
        };

        let key = Self::key_for(&item, Some(&insight));
        match self.generate(&insight).await {
            Ok(script) => ProcessingResult::succeeded(item, extract_title(&insight), key, script),
            Err(e) => ProcessingResult::failed(item, key, e.to_string()),
        }
    }
}
