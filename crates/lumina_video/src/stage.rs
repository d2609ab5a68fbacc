//! The video stage: scripts in, MP4 files out.

use crate::{ChainOutcome, ChainState, VideoChain, parse_scenes};
use derive_getters::Getters;
use lumina_core::{ArtifactKind, RunSummary, SourceItem, file_stem};
use lumina_error::{LuminaResult, PipelineError, PipelineErrorKind};
use lumina_interface::{ClipHandle, ObjectStore, VideoGenerator};
use lumina_storage::ExistingOutputIndex;
use std::sync::Arc;

/// Key of the video generated from a script.
///
/// # Examples
///
/// ```
/// use lumina_video::video_key;
///
/// assert_eq!(video_key("roteiro_golpes_no_pix.md"), "roteiro_golpes_no_pix.mp4");
/// ```
pub fn video_key(script_key: &str) -> String {
    format!("{}{}", file_stem(script_key), ArtifactKind::Video.extension())
}

/// What happened to one script.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct VideoRecord {
    /// Script the video was generated from
    source: SourceItem,
    /// Key of the video
    video_key: String,
    /// Chain result, absent when the script could not be read
    outcome: Option<ChainOutcome>,
    /// Whether a clip was written to the store
    persisted: bool,
    /// Failure detail
    error: Option<String>,
}

/// Everything a finished video stage produced.
#[derive(Debug, Clone, Getters)]
pub struct VideoStageOutcome {
    /// One record per processed script, in processing order
    records: Vec<VideoRecord>,
    /// Counts for the end-of-run report
    summary: RunSummary,
}

/// Generates videos for scripts, one at a time.
pub struct VideoStage {
    store: Arc<dyn ObjectStore>,
    generator: Arc<dyn VideoGenerator>,
    chain: VideoChain,
    video_scope: String,
    max_videos: Option<usize>,
}

impl VideoStage {
    /// Create a stage writing videos into `video_scope`.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        generator: Arc<dyn VideoGenerator>,
        chain: VideoChain,
        video_scope: impl Into<String>,
    ) -> Self {
        Self {
            store,
            generator,
            chain,
            video_scope: video_scope.into(),
            max_videos: None,
        }
    }

    /// Cap the number of videos generated per run.
    pub fn with_max_videos(mut self, max_videos: Option<usize>) -> Self {
        self.max_videos = max_videos;
        self
    }

    /// Scripts whose video does not exist yet, capped to the first N.
    ///
    /// Returns the pending scripts and how many were skipped because their
    /// video already exists.
    pub fn backlog(
        &self,
        scripts: Vec<SourceItem>,
        index: &ExistingOutputIndex,
    ) -> (Vec<SourceItem>, usize) {
        let considered = scripts.len();
        let mut pending: Vec<SourceItem> = scripts
            .into_iter()
            .filter(|item| {
                let exists = item
                    .stored_key()
                    .is_some_and(|key| index.contains(&video_key(key)));
                if exists {
                    tracing::debug!(source = %item, "Video exists, skipping");
                }
                !exists
            })
            .collect();
        let already_satisfied = considered - pending.len();

        if let Some(max) = self.max_videos.filter(|max| pending.len() > *max) {
            tracing::info!(max, pending = pending.len(), "Limiting videos for this run");
            pending.truncate(max);
        }
        (pending, already_satisfied)
    }

    /// Generate and persist a video for every pending script.
    ///
    /// Scripts run strictly one after another. A chain that fails after
    /// producing a clip still has that clip saved.
    #[tracing::instrument(skip_all, fields(scope = %self.video_scope, scripts = scripts.len()))]
    pub async fn run(&self, scripts: Vec<SourceItem>) -> VideoStageOutcome {
        let index = ExistingOutputIndex::load(self.store.as_ref(), &self.video_scope).await;
        let considered = scripts.len();
        let (pending, already_satisfied) = self.backlog(scripts, &index);
        let total = pending.len();
        let mut summary = RunSummary::new(considered, already_satisfied, total);

        if total > 0 {
            if let Err(e) = self.store.ensure_scope(&self.video_scope).await {
                tracing::warn!(
                    error = %e,
                    "Could not prepare video scope; attempting writes anyway"
                );
            }
        }

        let mut records = Vec::with_capacity(total);
        for (i, item) in pending.into_iter().enumerate() {
            let record = self.produce(item).await;
            match (record.persisted, record.outcome.as_ref().map(ChainOutcome::state)) {
                (true, Some(ChainState::Done)) => {
                    summary.record_success();
                    tracing::info!(
                        "[{}/{}] {} -> {}",
                        i + 1,
                        total,
                        record.source,
                        record.video_key
                    );
                }
                (false, Some(ChainState::Done)) => {
                    summary.record_persist_failure();
                    tracing::error!(
                        "[{}/{}] {} -> not saved: {}",
                        i + 1,
                        total,
                        record.source,
                        record.error.as_deref().unwrap_or_default()
                    );
                }
                (persisted, _) => {
                    summary.record_failure();
                    tracing::warn!(
                        partial_saved = persisted,
                        "[{}/{}] {} -> ERROR: {}",
                        i + 1,
                        total,
                        record.source,
                        record.error.as_deref().unwrap_or_default()
                    );
                }
            }
            records.push(record);
        }

        tracing::info!("Video stage finished\n{}", summary);
        VideoStageOutcome { records, summary }
    }

    async fn produce(&self, item: SourceItem) -> VideoRecord {
        let key = item.stored_key().map(video_key).unwrap_or_default();
        let script = match self.load_script(&item).await {
            Ok(script) => script,
            Err(e) => {
                return VideoRecord {
                    source: item,
                    video_key: key,
                    outcome: None,
                    persisted: false,
                    error: Some(e.to_string()),
                };
            }
        };

        let scenes = parse_scenes(&script);
        tracing::info!(source = %item, scenes = scenes.len(), "Scenes extracted");
        let outcome = self.chain.run(&scenes).await;

        let mut error = outcome.error().clone();
        let mut persisted = false;
        if let Some(clip) = outcome.clip() {
            match self.save(clip, &key, &outcome).await {
                Ok(()) => persisted = true,
                Err(e) => error = Some(e.to_string()),
            }
        }

        VideoRecord {
            source: item,
            video_key: key,
            outcome: Some(outcome),
            persisted,
            error,
        }
    }

    async fn load_script(&self, item: &SourceItem) -> LuminaResult<String> {
        let lumina_core::SourceHandle::Stored { scope, key } = item.handle() else {
            return Err(PipelineError::new(PipelineErrorKind::SourceLoad {
                source_ref: item.to_string(),
                message: "scripts must be stored documents".to_string(),
            })
            .into());
        };
        let script = self.store.get_text(scope, key).await?;
        if script.trim().is_empty() {
            return Err(PipelineError::new(PipelineErrorKind::EmptyContent("script".into())).into());
        }
        Ok(script)
    }

    async fn save(
        &self,
        clip: &ClipHandle,
        key: &str,
        outcome: &ChainOutcome,
    ) -> LuminaResult<()> {
        tracing::info!(
            seconds = outcome.duration().as_secs(),
            "Downloading final video"
        );
        let bytes = self.generator.download(clip).await?;
        tracing::info!(bytes = bytes.len(), "Download complete");
        self.store
            .put(
                &self.video_scope,
                key,
                bytes,
                ArtifactKind::Video.content_type(),
            )
            .await
    }
}
