//! Consolidated insights and script naming.

mod common;

use common::text;
use lumina_core::{CONSOLIDATED_INSIGHTS_KEY, ProcessingResult, SourceHandle, SourceItem};
use lumina_pipeline::{
    ItemProcessor, ScriptProcessor, consolidate, consolidation_input, load_context,
};
use lumina_storage::{MemoryStore, ObjectStore};
use std::sync::Arc;

fn url(n: usize) -> SourceItem {
    SourceItem::new(n, SourceHandle::Url(format!("https://example.org/{}", n)))
}

#[test]
fn test_consolidation_input_skips_failures() {
    let results = vec![
        ProcessingResult::succeeded(url(1), None, "topico_a.md", "# A".to_string()),
        ProcessingResult::failed(url(2), "topico_2.md", "timeout"),
        ProcessingResult::succeeded(url(3), None, "topico_c.md", "# C".to_string()),
    ];

    assert_eq!(
        consolidation_input(&results),
        "### topico_a.md\n\n# A\n\n---\n### topico_c.md\n\n# C\n\n---\n"
    );
}

#[tokio::test]
async fn test_consolidate_stores_document_used_as_context() {
    let store = MemoryStore::new();
    let generator = text(|prompt| {
        prompt
            .contains("### topico_a.md")
            .then(|| "# Consolidado\n\nResumo geral.".to_string())
    });
    let results = vec![ProcessingResult::succeeded(
        url(1),
        None,
        "topico_a.md",
        "# A".to_string(),
    )];

    assert_eq!(load_context(&store, "insights").await, None);

    let document = consolidate(generator.as_ref(), &store, "insights", &results)
        .await
        .unwrap();
    assert_eq!(document.as_deref(), Some("# Consolidado\n\nResumo geral."));
    assert!(store.get("insights", CONSOLIDATED_INSIGHTS_KEY).await.is_ok());
    assert_eq!(
        load_context(&store, "insights").await.as_deref(),
        Some("# Consolidado\n\nResumo geral.")
    );
}

#[tokio::test]
async fn test_consolidate_without_successes_is_a_no_op() {
    let store = MemoryStore::new();
    let generator = text(|_| Some("unused".to_string()));
    let results: Vec<ProcessingResult<String>> =
        vec![ProcessingResult::failed(url(1), "topico_1.md", "boom")];

    let document = consolidate(generator.as_ref(), &store, "insights", &results)
        .await
        .unwrap();
    assert_eq!(document, None);
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn test_script_key_falls_back_to_insight_file_stem() {
    let store = Arc::new(MemoryStore::new());
    store
        .put("insights", "topico_7.md", b"Texto sem titulo.".to_vec(), "text/markdown")
        .await
        .unwrap();
    let generator = text(|prompt| {
        prompt
            .contains("CONTEXTO ADICIONAL")
            .then(|| "## Cena 1\n- Descrição visual: Praça.".to_string())
    });
    let processor = ScriptProcessor::new(store.clone(), generator, 2)
        .with_context(Some("Contexto consolidado".to_string()));
    let item = SourceItem::new(
        1,
        SourceHandle::Stored {
            scope: "insights".into(),
            key: "topico_7.md".into(),
        },
    );

    assert_eq!(
        processor.expected_key(&item).await.as_deref(),
        Some("roteiro_topico_7.md")
    );
    let result = processor.process(item).await;
    assert!(result.is_success(), "{:?}", result.error());
    assert_eq!(result.output_key(), "roteiro_topico_7.md");
}
