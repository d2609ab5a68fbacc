//! Stage runners wiring configuration, stores and providers together.
//!
//! Each binary calls one or more of these after pre-flight validation.
//! Providers are passed in, so the same runners work against fakes.

use crate::LuminaConfig;
use async_trait::async_trait;
use lumina_core::{ArtifactKind, CONSOLIDATED_INSIGHTS_KEY, PillContent};
use lumina_error::LuminaResult;
use lumina_interface::{
    ContentExtractor, ImageGenerator, ObjectStore, SourceEnumerator, TextGenerator, VideoGenerator,
};
use lumina_pipeline::{
    InsightProcessor, MarkdownSink, Orchestrator, PillProcessor, PillSink, ScriptProcessor,
    StageOutcome, consolidate, load_context,
};
use lumina_storage::{
    ExistingOutputIndex, FileSystemStore, S3ObjectStore, StoredDocumentSource, UrlListSource,
};
use lumina_video::{CancellationToken, VideoChain, VideoStage, VideoStageOutcome};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Open the store selected by `SAVE_ON_MINIO`.
pub fn open_store(config: &LuminaConfig) -> LuminaResult<Arc<dyn ObjectStore>> {
    if *config.use_object_store() {
        let store = S3ObjectStore::new(&config.s3_settings()?);
        info!(endpoint = %config.store_endpoint(), "Using S3 object store");
        Ok(Arc::new(store))
    } else {
        let store = FileSystemStore::new(config.local_output_dir().clone())?;
        info!(path = %config.local_output_dir().display(), "Using local filesystem store");
        Ok(Arc::new(store))
    }
}

/// Image generator used when Imagen is unavailable; pills get no infographic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInfographics;

#[async_trait]
impl ImageGenerator for NoInfographics {
    async fn generate_image(&self, _prompt: &str) -> Option<Vec<u8>> {
        None
    }
}

/// Scrape the source URLs into insights, then consolidate them.
///
/// Insight keys depend on generated content, so every URL is processed on
/// every run. `WIPE_BUCKET_BEFORE_START` clears the scope first.
#[instrument(skip_all, fields(scope = %config.insight_scope()))]
pub async fn run_insights(
    config: &LuminaConfig,
    store: Arc<dyn ObjectStore>,
    extractor: Arc<dyn ContentExtractor>,
    generator: Arc<dyn TextGenerator>,
) -> LuminaResult<StageOutcome<String>> {
    let scope = config.insight_scope();
    if *config.wipe_insights() {
        match store.wipe(scope).await {
            Ok(removed) => info!(removed, "Cleared insight scope"),
            Err(e) if e.is_missing_scope() => info!("Insight scope does not exist yet"),
            Err(e) => warn!(error = %e, "Could not clear insight scope"),
        }
    }

    let sources = UrlListSource::new(config.sources_file().clone()).list_sources().await?;
    if sources.is_empty() {
        warn!(path = %config.sources_file().display(), "No source URLs found");
    }

    let processor = Arc::new(InsightProcessor::new(extractor, generator.clone()));
    let orchestrator = Orchestrator::new(processor, config.orchestrator(None)?);
    let sink = MarkdownSink::new(store.clone(), scope.clone(), ArtifactKind::Insight);
    let outcome = orchestrator
        .run_stage(sources, &ExistingOutputIndex::default(), &sink)
        .await;

    if let Err(e) = consolidate(generator.as_ref(), store.as_ref(), scope, outcome.results()).await
    {
        warn!(error = %e, "Failed to consolidate insights");
    }
    Ok(outcome)
}

fn stored_insights(config: &LuminaConfig, store: Arc<dyn ObjectStore>) -> StoredDocumentSource {
    StoredDocumentSource::new(
        store,
        config.insight_scope().clone(),
        ArtifactKind::Insight.extension(),
    )
    .excluding(CONSOLIDATED_INSIGHTS_KEY)
}

/// Generate a video script for every insight that has none yet.
#[instrument(skip_all, fields(scope = %config.script_scope()))]
pub async fn run_scripts(
    config: &LuminaConfig,
    store: Arc<dyn ObjectStore>,
    generator: Arc<dyn TextGenerator>,
) -> LuminaResult<StageOutcome<String>> {
    let sources = stored_insights(config, store.clone()).list_sources().await?;
    let context = load_context(store.as_ref(), config.insight_scope()).await;
    let index = ExistingOutputIndex::load(store.as_ref(), config.script_scope()).await;

    let processor = Arc::new(
        ScriptProcessor::new(store.clone(), generator, *config.scene_count()).with_context(context),
    );
    let orchestrator = Orchestrator::new(processor, config.orchestrator(None)?);
    let sink = MarkdownSink::new(store, config.script_scope().clone(), ArtifactKind::Script);
    Ok(orchestrator.run_stage(sources, &index, &sink).await)
}

/// Generate a knowledge pill for every insight that has none yet.
#[instrument(skip_all, fields(scope = %config.pill_scope()))]
pub async fn run_pills(
    config: &LuminaConfig,
    store: Arc<dyn ObjectStore>,
    text: Arc<dyn TextGenerator>,
    image: Arc<dyn ImageGenerator>,
) -> LuminaResult<StageOutcome<PillContent>> {
    let sources = stored_insights(config, store.clone()).list_sources().await?;
    let context = load_context(store.as_ref(), config.insight_scope()).await;
    let index = ExistingOutputIndex::load(store.as_ref(), config.pill_scope()).await;

    let processor =
        Arc::new(PillProcessor::new(store.clone(), text, image).with_context(context));
    let orchestrator = Orchestrator::new(processor, config.orchestrator(config.max_pills())?);
    let sink = PillSink::new(
        store,
        config.pill_scope().clone(),
        config.infographic_scope().clone(),
    );
    Ok(orchestrator.run_stage(sources, &index, &sink).await)
}

/// Generate a video for every stored script that has none yet.
#[instrument(skip_all, fields(scope = %config.video_scope()))]
pub async fn run_videos(
    config: &LuminaConfig,
    store: Arc<dyn ObjectStore>,
    generator: Arc<dyn VideoGenerator>,
    cancel: CancellationToken,
) -> LuminaResult<VideoStageOutcome> {
    let scripts = StoredDocumentSource::new(
        store.clone(),
        config.script_scope().clone(),
        ArtifactKind::Script.extension(),
    )
    .list_sources()
    .await?;

    let chain = VideoChain::new(generator.clone(), config.chain()?).with_cancellation(cancel);
    let stage = VideoStage::new(store, generator, chain, config.video_scope().clone())
        .with_max_videos(config.max_videos());
    Ok(stage.run(scripts).await)
}
