//! Chained video generation.
//!
//! The chain generates an initial clip from the first scene, then extends
//! it once per following scene. Every step waits for its long-running
//! operation before the next one starts, since each extension consumes the
//! previous clip.
//!
//! ```text
//! Initial ──ok──▶ Extending(1) ──ok──▶ … ──▶ Done
//!    │                 │
//!   err               err
//!    ▼                 ▼
//! Failed (no clip)   Failed (last good clip kept)
//! ```

use derive_builder::Builder;
use derive_getters::Getters;
use lumina_core::ScenePrompt;
use lumina_error::{LuminaResult, VideoError, VideoErrorKind};
use lumina_interface::{ClipHandle, OperationHandle, OperationStatus, VideoGenerator};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Position of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ChainState {
    /// No clip generated yet
    #[display("initial")]
    Initial,
    /// Initial clip done; the given extension is next
    #[display("extending({})", _0)]
    Extending(usize),
    /// Every requested extension completed
    #[display("done")]
    Done,
    /// A step failed
    #[display("failed")]
    Failed,
}

/// Chain settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Builder)]
#[builder(setter(into))]
pub struct ChainConfig {
    /// Extensions to chain after the initial clip
    #[builder(default = "5")]
    extensions: usize,
    /// Pause between operation polls
    #[builder(default = "Duration::from_secs(10)")]
    poll_interval: Duration,
    /// Longest wait for one operation; `None` waits until it finishes
    #[builder(default)]
    deadline: Option<Duration>,
}

impl ChainConfig {
    /// Creates a new builder for `ChainConfig`.
    pub fn builder() -> ChainConfigBuilder {
        ChainConfigBuilder::default()
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            extensions: 5,
            poll_interval: Duration::from_secs(10),
            deadline: None,
        }
    }
}

/// Terminal state of a chain run.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ChainOutcome {
    /// `Done` or `Failed`
    state: ChainState,
    /// Last successfully generated clip
    clip: Option<ClipHandle>,
    /// Extensions that completed
    extensions_completed: usize,
    /// Extensions the chain attempted to reach
    extensions_requested: usize,
    /// Failure detail when `state` is `Failed`
    error: Option<String>,
    /// Nominal duration of `clip`
    duration: Duration,
}

impl ChainOutcome {
    /// Whether the chain reached `Done`.
    pub fn is_done(&self) -> bool {
        self.state == ChainState::Done
    }
}

/// Drives one video through its initial clip and extensions.
pub struct VideoChain {
    generator: Arc<dyn VideoGenerator>,
    config: ChainConfig,
    cancel: CancellationToken,
}

impl VideoChain {
    /// Create a chain that is never cancelled.
    pub fn new(generator: Arc<dyn VideoGenerator>, config: ChainConfig) -> Self {
        Self {
            generator,
            config,
            cancel: CancellationToken::new(),
        }
    }

    /// Abort waiting when `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Extensions this chain will attempt for `scene_count` scenes.
    ///
    /// Bounded by the configuration, by the backend's capabilities and by
    /// the scenes available after the first.
    pub fn planned_extensions(&self, scene_count: usize) -> usize {
        self.generator
            .backend()
            .effective_extensions(self.config.extensions)
            .min(scene_count.saturating_sub(1))
    }

    /// Run the chain over `scenes`.
    #[tracing::instrument(
        skip_all,
        fields(scenes = scenes.len(), backend = %self.generator.backend().mode())
    )]
    pub async fn run(&self, scenes: &[ScenePrompt]) -> ChainOutcome {
        if self.config.extensions > 0 && !self.generator.backend().supports_extension() {
            tracing::warn!(
                requested = self.config.extensions,
                "Backend cannot extend clips; generating a single clip"
            );
        }
        let requested = self.planned_extensions(scenes.len());
        let mut state = ChainState::Initial;
        let mut clip: Option<ClipHandle> = None;
        let mut completed = 0;

        loop {
            let step = match state {
                ChainState::Initial => match scenes.first() {
                    Some(scene) => {
                        tracing::info!(scene = scene.ordinal(), "Generating initial clip");
                        self.initial(scene).await
                    }
                    None => Err(VideoError::new(VideoErrorKind::Start(
                        "no scenes to generate".to_string(),
                    ))
                    .into()),
                },
                ChainState::Extending(i) => match (clip.as_ref(), scenes.get(i)) {
                    (Some(current), Some(scene)) if i <= requested => {
                        tracing::info!(
                            scene = scene.ordinal(),
                            "Extending video ({}/{})",
                            i,
                            requested
                        );
                        self.extend(current, scene).await
                    }
                    _ => {
                        state = ChainState::Done;
                        continue;
                    }
                },
                ChainState::Done | ChainState::Failed => break,
            };

            match step {
                Ok(next) => {
                    if let ChainState::Extending(_) = state {
                        completed += 1;
                    }
                    clip = Some(next);
                    state = ChainState::Extending(completed + 1);
                }
                Err(e) => {
                    tracing::error!(state = %state, error = %e, "Video step failed");
                    let error = Some(e.to_string());
                    return self.finish(ChainState::Failed, clip, completed, requested, error);
                }
            }
        }

        self.finish(state, clip, completed, requested, None)
    }

    fn finish(
        &self,
        state: ChainState,
        clip: Option<ClipHandle>,
        completed: usize,
        requested: usize,
        error: Option<String>,
    ) -> ChainOutcome {
        let duration = if clip.is_some() {
            self.generator.backend().total_duration(completed)
        } else {
            Duration::ZERO
        };
        tracing::info!(
            state = %state,
            extensions = completed,
            seconds = duration.as_secs(),
            "Video chain finished"
        );
        ChainOutcome {
            state,
            clip,
            extensions_completed: completed,
            extensions_requested: requested,
            error,
            duration,
        }
    }

    async fn initial(&self, scene: &ScenePrompt) -> LuminaResult<ClipHandle> {
        let operation = self.generator.start_video(scene.text()).await?;
        self.wait(&operation).await
    }

    async fn extend(&self, clip: &ClipHandle, scene: &ScenePrompt) -> LuminaResult<ClipHandle> {
        let operation = self.generator.start_extension(clip, scene.text()).await?;
        self.wait(&operation).await
    }

    /// Poll until the operation finishes, the deadline passes or the chain
    /// is cancelled.
    async fn wait(&self, operation: &OperationHandle) -> LuminaResult<ClipHandle> {
        let started = Instant::now();
        loop {
            match self.generator.poll(operation).await? {
                OperationStatus::Done(clip) => return Ok(clip),
                OperationStatus::Error(message) => {
                    return Err(VideoError::new(VideoErrorKind::OperationFailed(message)).into());
                }
                OperationStatus::Pending => {}
            }

            if let Some(deadline) = self.config.deadline.filter(|d| started.elapsed() >= *d) {
                return Err(VideoError::new(VideoErrorKind::DeadlineExceeded {
                    operation: operation.name.clone(),
                    seconds: deadline.as_secs(),
                })
                .into());
            }

            tracing::debug!(operation = %operation.name, "Operation pending");
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    return Err(VideoError::new(VideoErrorKind::Cancelled).into());
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {}
            }
        }
    }
}
