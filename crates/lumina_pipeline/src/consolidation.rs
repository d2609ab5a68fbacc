//! Consolidated insight document shared as context by later stages.

use crate::{CONTEXT_LIMIT, consolidation_prompt, processor::require_text};
use lumina_core::{
    ArtifactKind, CONSOLIDATED_INSIGHTS_KEY, ProcessingResult, truncate_chars,
};
use lumina_error::LuminaResult;
use lumina_interface::{ObjectStore, TextGenerator};

/// Combined markdown of every successful insight, one section per key.
pub fn consolidation_input(results: &[ProcessingResult<String>]) -> String {
    results
        .iter()
        .filter_map(|result| {
            result
                .content()
                .map(|markdown| format!("### {}\n\n{}\n\n---\n", result.output_key(), markdown))
        })
        .collect()
}

/// Summarize a run's insights into [`CONSOLIDATED_INSIGHTS_KEY`].
///
/// Returns the stored document, or `None` when no insight succeeded.
#[tracing::instrument(skip_all, fields(scope = %scope, results = results.len()))]
pub async fn consolidate(
    generator: &dyn TextGenerator,
    store: &dyn ObjectStore,
    scope: &str,
    results: &[ProcessingResult<String>],
) -> LuminaResult<Option<String>> {
    let input = consolidation_input(results);
    if input.is_empty() {
        tracing::info!("No insights to consolidate");
        return Ok(None);
    }

    let document = generator.generate(&consolidation_prompt(&input)).await?;
    let document = require_text(document, "consolidated insights")?;
    store
        .put(
            scope,
            CONSOLIDATED_INSIGHTS_KEY,
            document.as_bytes().to_vec(),
            ArtifactKind::Insight.content_type(),
        )
        .await?;
    tracing::info!("Saved {}", CONSOLIDATED_INSIGHTS_KEY);
    Ok(Some(document))
}

/// Load the consolidated document as prompt context, if one exists.
pub async fn load_context(store: &dyn ObjectStore, scope: &str) -> Option<String> {
    match store.get_text(scope, CONSOLIDATED_INSIGHTS_KEY).await {
        Ok(text) if !text.trim().is_empty() => {
            tracing::info!("Using {} as context", CONSOLIDATED_INSIGHTS_KEY);
            Some(truncate_chars(&text, CONTEXT_LIMIT).to_string())
        }
        Ok(_) => None,
        Err(e) if e.is_missing_object() || e.is_missing_scope() => {
            tracing::info!("{} not found; continuing without context", CONSOLIDATED_INSIGHTS_KEY);
            None
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not load consolidated insights");
            None
        }
    }
}
