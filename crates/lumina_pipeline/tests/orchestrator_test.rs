//! Fan-out/fan-in behavior of the orchestrator.

mod common;

use async_trait::async_trait;
use common::{ScriptedText, StaticPages, text};
use lumina_core::{ArtifactKind, ProcessingResult, SourceHandle, SourceItem};
use lumina_error::{LuminaResult, StorageError, StorageErrorKind};
use lumina_pipeline::{
    InsightProcessor, ItemProcessor, MarkdownSink, Orchestrator, OrchestratorConfig, ResultSink,
    ScriptProcessor,
};
use lumina_storage::{ExistingOutputIndex, MemoryStore, ObjectStore};
use std::sync::Arc;
use std::time::Duration;

fn url_items(count: usize) -> Vec<SourceItem> {
    (1..=count)
        .map(|n| SourceItem::new(n, SourceHandle::Url(format!("https://example.org/site-{}", n))))
        .collect()
}

fn config(workers: usize, max_items: Option<usize>) -> OrchestratorConfig {
    OrchestratorConfig::builder()
        .worker_count(workers)
        .max_items(max_items)
        .build()
        .unwrap()
}

/// Insight generator titling each page after its URL, failing on site-2.
fn insight_text() -> Arc<ScriptedText> {
    text(|prompt| {
        (1..=9)
            .find(|n| {
                prompt.contains(&format!("site-{}\n", n))
                    || prompt.contains(&format!("site-{}.", n))
            })
            .filter(|n| *n != 2)
            .map(|n| format!("# Golpe número {}\n\nConteúdo do insight.", n))
    })
}

#[tokio::test]
async fn test_failed_item_does_not_stop_the_others() {
    let store = Arc::new(MemoryStore::new());
    let generator = insight_text();
    let processor = InsightProcessor::new(Arc::new(StaticPages), generator.clone());
    let orchestrator = Orchestrator::new(Arc::new(processor), config(2, None));
    let sink = MarkdownSink::new(store.clone(), "insights", ArtifactKind::Insight);

    let outcome = orchestrator
        .run_stage(url_items(3), &ExistingOutputIndex::default(), &sink)
        .await;

    assert_eq!(outcome.results().len(), 3);
    let failed: Vec<&ProcessingResult<String>> =
        outcome.results().iter().filter(|r| !r.is_success()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].source().ordinal(), &2);
    assert!(!failed[0].error().unwrap_or_default().is_empty());
    assert!(failed[0].content().is_none());

    assert_eq!(outcome.summary().succeeded(), &2);
    assert_eq!(outcome.summary().failed(), &1);
    assert_eq!(store.len("insights"), 2);

    let mut keys = store.list("insights").await.unwrap();
    keys.sort();
    assert_eq!(keys, vec!["topico_golpe_numero_1.md", "topico_golpe_numero_3.md"]);
    assert_eq!(
        store.content_type("insights", "topico_golpe_numero_1.md").as_deref(),
        Some(ArtifactKind::Insight.content_type())
    );
}

#[tokio::test]
async fn test_untitled_insight_is_named_by_ordinal() {
    let store = Arc::new(MemoryStore::new());
    let generator = text(|_| Some("Sem título, apenas texto.".to_string()));
    let processor = InsightProcessor::new(Arc::new(StaticPages), generator);
    let orchestrator = Orchestrator::new(Arc::new(processor), config(1, None));

    let results = orchestrator.run(url_items(1)).await;
    assert_eq!(results[0].output_key(), "topico_1.md");
    assert_eq!(results[0].title(), None);
}

#[tokio::test]
async fn test_worker_count_bounds_concurrency() {
    let generator = Arc::new(
        ScriptedText::new(|_| Some("# Título\n\ntexto".to_string()))
            .with_delay(Duration::from_millis(20)),
    );
    let processor = InsightProcessor::new(Arc::new(StaticPages), generator.clone());
    let orchestrator = Orchestrator::new(Arc::new(processor), config(3, None));

    let results = orchestrator.run(url_items(9)).await;

    assert_eq!(results.len(), 9);
    assert_eq!(generator.calls(), 9);
    assert!(generator.peak_concurrency() <= 3);
    assert!(generator.peak_concurrency() >= 1);
}

async fn seed_insights(store: &MemoryStore, titles: &[&str]) -> Vec<SourceItem> {
    let mut items = Vec::new();
    for (i, title) in titles.iter().enumerate() {
        let key = format!("topico_{}.md", i + 1);
        store
            .put(
                "insights",
                &key,
                format!("# {}\n\nConteúdo.", title).into_bytes(),
                "text/markdown",
            )
            .await
            .unwrap();
        items.push(SourceItem::new(
            i + 1,
            SourceHandle::Stored {
                scope: "insights".into(),
                key,
            },
        ));
    }
    items
}

#[tokio::test]
async fn test_rerun_skips_outputs_from_previous_run() {
    let store = Arc::new(MemoryStore::new());
    let sources =
        seed_insights(&store, &["Golpe do Pix", "Senhas fortes", "WhatsApp clonado"]).await;
    let generator = text(|_| Some("## Cena 1\n- Descrição visual: Uma porta.\n".to_string()));
    let processor = Arc::new(ScriptProcessor::new(store.clone(), generator.clone(), 3));
    let orchestrator = Orchestrator::new(processor, config(2, None));
    let sink = MarkdownSink::new(store.clone(), "roteiros", ArtifactKind::Script);

    let first_index = ExistingOutputIndex::load(store.as_ref(), "roteiros").await;
    let first = orchestrator.run_stage(sources.clone(), &first_index, &sink).await;
    assert_eq!(first.summary().succeeded(), &3);
    assert_eq!(generator.calls(), 3);

    let second_index = ExistingOutputIndex::load(store.as_ref(), "roteiros").await;
    for key in first.persisted() {
        assert!(second_index.contains(key));
    }
    let second = orchestrator.run_stage(sources, &second_index, &sink).await;

    assert_eq!(second.summary().already_satisfied(), &3);
    assert_eq!(second.summary().attempted(), &0);
    assert!(second.results().is_empty());
    assert_eq!(generator.calls(), 3);
}

#[tokio::test]
async fn test_max_items_keeps_first_n() {
    let store = Arc::new(MemoryStore::new());
    let sources = seed_insights(&store, &["Um", "Dois", "Três", "Quatro", "Cinco"]).await;
    let generator = text(|_| Some("roteiro".to_string()));
    let processor = Arc::new(ScriptProcessor::new(store.clone(), generator, 3));
    let orchestrator = Orchestrator::new(processor, config(4, Some(2)));

    let index = ExistingOutputIndex::from_keys(["roteiro_um.md".to_string()]);
    let backlog = orchestrator.backlog(sources, &index).await;

    assert_eq!(backlog.considered(), &5);
    assert_eq!(backlog.already_satisfied(), &1);
    let ordinals: Vec<usize> = backlog.items().iter().map(|i| *i.ordinal()).collect();
    assert_eq!(ordinals, vec![2, 3]);
}

/// Sink refusing one key.
struct RefusingSink {
    inner: MarkdownSink,
    refused: String,
}

#[async_trait]
impl ResultSink<String> for RefusingSink {
    async fn persist(
        &self,
        result: &ProcessingResult<String>,
        content: &String,
    ) -> LuminaResult<()> {
        if result.output_key() == self.refused {
            return Err(StorageError::new(StorageErrorKind::Write("disk full".into())).into());
        }
        self.inner.persist(result, content).await
    }
}

#[tokio::test]
async fn test_persist_failure_is_isolated() {
    let store = Arc::new(MemoryStore::new());
    let sources = seed_insights(&store, &["Primeiro", "Segundo", "Terceiro"]).await;
    let generator = text(|_| Some("roteiro".to_string()));
    let processor = Arc::new(ScriptProcessor::new(store.clone(), generator, 3));
    let orchestrator = Orchestrator::new(processor, config(3, None));
    let sink = RefusingSink {
        inner: MarkdownSink::new(store.clone(), "roteiros", ArtifactKind::Script),
        refused: "roteiro_segundo.md".to_string(),
    };

    let outcome = orchestrator
        .run_stage(sources, &ExistingOutputIndex::default(), &sink)
        .await;

    assert_eq!(outcome.summary().succeeded(), &2);
    assert_eq!(outcome.summary().persist_failures(), &1);
    assert_eq!(outcome.summary().failed(), &0);
    assert_eq!(store.len("roteiros"), 2);
    assert!(!outcome.persisted().contains(&"roteiro_segundo.md".to_string()));
}

/// Processor whose task panics on one ordinal.
struct PanicsOn(usize);

#[async_trait]
impl ItemProcessor for PanicsOn {
    type Output = String;

    fn name(&self) -> &str {
        "panics"
    }

    async fn expected_key(&self, item: &SourceItem) -> Option<String> {
        Some(format!("saida_{}.md", item.ordinal()))
    }

    async fn process(&self, item: SourceItem) -> ProcessingResult<String> {
        if *item.ordinal() == self.0 {
            panic!("processor bug on item {}", self.0);
        }
        let key = format!("saida_{}.md", item.ordinal());
        ProcessingResult::succeeded(item, None, key, "ok".to_string())
    }
}

#[tokio::test]
async fn test_panicking_worker_becomes_failed_result() {
    let orchestrator = Orchestrator::new(Arc::new(PanicsOn(2)), config(2, None));

    let results = orchestrator.run(url_items(3)).await;

    assert_eq!(results.len(), 3);
    let failed: Vec<&ProcessingResult<String>> =
        results.iter().filter(|r| !r.is_success()).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].source().ordinal(), &2);
    assert_eq!(failed[0].output_key(), "saida_2.md");
    let error = failed[0].error().unwrap_or_default();
    assert!(error.contains("Worker task failed"), "{}", error);
    assert!(error.contains("panicked"), "{}", error);
}
