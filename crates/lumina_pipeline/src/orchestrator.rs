//! Fan-out/fan-in execution of one pipeline stage.
//!
//! A stage runs in three steps:
//!
//! 1. **Backlog**: drop items whose expected key is already stored, then cap
//!    the remainder (first N, in enumeration order)
//! 2. **Fan-out**: process the backlog on a bounded pool of tasks and collect
//!    every result in completion order
//! 3. **Persist**: write successful results one at a time; a failed write
//!    never affects the other items

use crate::{ItemProcessor, ResultSink};
use derive_builder::Builder;
use derive_getters::Getters;
use lumina_core::{ProcessingResult, RunSummary, SourceItem};
use lumina_error::{PipelineError, PipelineErrorKind};
use lumina_storage::ExistingOutputIndex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Work left for a run after filtering against existing outputs.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Backlog {
    /// Items to process, in enumeration order
    items: Vec<SourceItem>,
    /// Items enumerated before filtering
    considered: usize,
    /// Items skipped because their output exists
    already_satisfied: usize,
}

impl Backlog {
    /// Consume the backlog, returning its items.
    pub fn into_items(self) -> Vec<SourceItem> {
        self.items
    }
}

/// Stage execution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Builder)]
#[builder(setter(into))]
pub struct OrchestratorConfig {
    /// Maximum number of items processed concurrently
    #[builder(default = "4")]
    worker_count: usize,
    /// Cap on the backlog size; `None` processes everything
    #[builder(default)]
    max_items: Option<usize>,
}

impl OrchestratorConfig {
    /// Creates a new builder for `OrchestratorConfig`.
    pub fn builder() -> OrchestratorConfigBuilder {
        OrchestratorConfigBuilder::default()
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            worker_count: 4,
            max_items: None,
        }
    }
}

/// Everything a finished stage produced.
#[derive(Debug, Clone, Getters)]
pub struct StageOutcome<T> {
    /// Results in completion order
    results: Vec<ProcessingResult<T>>,
    /// Counts for the end-of-run report
    summary: RunSummary,
    /// Keys written to the store
    persisted: Vec<String>,
}

/// Runs an [`ItemProcessor`] over a backlog.
pub struct Orchestrator<P> {
    processor: Arc<P>,
    config: OrchestratorConfig,
}

impl<P> Orchestrator<P>
where
    P: ItemProcessor + 'static,
{
    /// Create an orchestrator sharing `processor` across its workers.
    pub fn new(processor: Arc<P>, config: OrchestratorConfig) -> Self {
        Self { processor, config }
    }

    /// Filter `sources` against `index` and apply the item cap.
    #[tracing::instrument(
        skip_all,
        fields(stage = self.processor.name(), sources = sources.len())
    )]
    pub async fn backlog(
        &self,
        sources: Vec<SourceItem>,
        index: &ExistingOutputIndex,
    ) -> Backlog {
        let considered = sources.len();
        let mut already_satisfied = 0;
        let mut items = Vec::with_capacity(considered);

        for item in sources {
            match self.processor.expected_key(&item).await {
                Some(key) if index.contains(&key) => {
                    tracing::debug!(source = %item, key = %key, "Output exists, skipping");
                    already_satisfied += 1;
                }
                _ => items.push(item),
            }
        }

        if let Some(max) = self.config.max_items.filter(|max| items.len() > *max) {
            tracing::info!(max, pending = items.len(), "Limiting backlog for this run");
            items.truncate(max);
        }

        Backlog {
            items,
            considered,
            already_satisfied,
        }
    }

    /// Key reported for an item whose task died before producing a result.
    async fn failed_key(&self, item: &SourceItem) -> String {
        self.processor
            .expected_key(item)
            .await
            .unwrap_or_else(|| format!("item_{}", item.ordinal()))
    }

    /// Process every item and wait for all of them.
    ///
    /// Results arrive in completion order. A task that panics is reported as
    /// a failed result for its item.
    #[tracing::instrument(
        skip_all,
        fields(
            stage = self.processor.name(),
            items = backlog.len(),
            workers = self.config.worker_count
        )
    )]
    pub async fn run(&self, backlog: Vec<SourceItem>) -> Vec<ProcessingResult<P::Output>> {
        let total = backlog.len();
        let permits = Arc::new(Semaphore::new(self.config.worker_count.max(1)));
        let mut tasks = JoinSet::new();
        let mut in_flight = HashMap::with_capacity(total);

        for item in backlog {
            let processor = Arc::clone(&self.processor);
            let permits = Arc::clone(&permits);
            let task_item = item.clone();
            let handle = tasks.spawn(async move {
                let _permit = permits.acquire_owned().await;
                processor.process(task_item).await
            });
            in_flight.insert(handle.id(), item);
        }

        let mut results = Vec::with_capacity(total);
        while let Some(joined) = tasks.join_next_with_id().await {
            let result = match joined {
                Ok((id, result)) => {
                    in_flight.remove(&id);
                    result
                }
                Err(e) => {
                    let Some(item) = in_flight.remove(&e.id()) else {
                        tracing::error!(error = %e, "Worker task ended for an unknown item");
                        continue;
                    };
                    let key = self.failed_key(&item).await;
                    let error = PipelineError::new(PipelineErrorKind::Worker(e.to_string()));
                    ProcessingResult::failed(item, key, error.to_string())
                }
            };

            let done = results.len() + 1;
            match result.error() {
                None => tracing::info!(
                    "[{}/{}] {} -> {}",
                    done,
                    total,
                    result.source(),
                    result.output_key()
                ),
                Some(error) => tracing::warn!(
                    "[{}/{}] {} -> ERROR: {}",
                    done,
                    total,
                    result.source(),
                    error
                ),
            }
            results.push(result);
        }

        results
    }

    /// Persist successful results through `sink`, updating `summary`.
    ///
    /// Returns the keys that were written.
    #[tracing::instrument(skip_all, fields(stage = self.processor.name(), results = results.len()))]
    pub async fn persist(
        &self,
        results: &[ProcessingResult<P::Output>],
        sink: &dyn ResultSink<P::Output>,
        summary: &mut RunSummary,
    ) -> Vec<String> {
        if let Err(e) = sink.prepare().await {
            tracing::warn!(error = %e, "Could not prepare destination; attempting writes anyway");
        }

        let mut persisted = Vec::new();
        for result in results {
            let Some(content) = result.content() else {
                summary.record_failure();
                tracing::warn!(
                    "Skipping {} due to error: {}",
                    result.source(),
                    result.error().unwrap_or_default()
                );
                continue;
            };

            match sink.persist(result, content).await {
                Ok(()) => {
                    summary.record_success();
                    persisted.push(result.output_key().to_string());
                }
                Err(e) => {
                    summary.record_persist_failure();
                    tracing::error!(
                        key = result.output_key(),
                        error = %e,
                        "Failed to persist result"
                    );
                }
            }
        }
        persisted
    }

    /// Backlog, fan-out and persistence in one call.
    pub async fn run_stage(
        &self,
        sources: Vec<SourceItem>,
        index: &ExistingOutputIndex,
        sink: &dyn ResultSink<P::Output>,
    ) -> StageOutcome<P::Output> {
        let backlog = self.backlog(sources, index).await;
        let mut summary = RunSummary::new(
            backlog.considered,
            backlog.already_satisfied,
            backlog.items.len(),
        );
        tracing::info!(
            stage = self.processor.name(),
            considered = backlog.considered,
            already_satisfied = backlog.already_satisfied,
            pending = backlog.items.len(),
            "Processing backlog with {} workers",
            self.config.worker_count
        );

        let results = self.run(backlog.into_items()).await;
        let persisted = self.persist(&results, sink, &mut summary).await;
        tracing::info!(stage = self.processor.name(), "Stage finished\n{}", summary);

        StageOutcome {
            results,
            summary,
            persisted,
        }
    }
}
