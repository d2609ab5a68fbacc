//! Stage runners against a filesystem store and scripted providers.

mod common;

use common::{EchoPages, InstantVideo, PipelineText};
use lumina::{
    CONSOLIDATED_INSIGHTS_KEY, CancellationToken, LuminaConfig, NoInfographics, ObjectStore,
    VideoBackend, open_store, run_insights, run_pills, run_scripts, run_videos,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

fn config_for(dir: &Path, extra: &[(&str, &str)]) -> LuminaConfig {
    let sources = dir.join("sites.txt");
    std::fs::write(
        &sources,
        "# fontes\nhttps://example.org/site-1\n\nhttps://example.org/site-2\nhttps://example.org/site-3\n",
    )
    .unwrap();

    let mut env: HashMap<String, String> = HashMap::from([
        ("SAVE_ON_MINIO".to_string(), "false".to_string()),
        (
            "LOCAL_OUTPUT_DIR".to_string(),
            dir.join("output").display().to_string(),
        ),
        ("SOURCES_FILE".to_string(), sources.display().to_string()),
        ("MAX_WORKERS".to_string(), "2".to_string()),
        ("VEO_EXTENSIONS".to_string(), "3".to_string()),
    ]);
    for (key, value) in extra {
        env.insert(key.to_string(), value.to_string());
    }
    LuminaConfig::from_sources(None, Some(env)).unwrap()
}

async fn sorted_keys(store: &dyn ObjectStore, scope: &str) -> Vec<String> {
    let mut keys = store.list(scope).await.unwrap();
    keys.sort();
    keys
}

#[tokio::test]
async fn test_insights_are_persisted_and_consolidated() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), &[]);
    let store = open_store(&config).unwrap();
    let text = Arc::new(PipelineText::default().failing_site(2));

    let outcome = run_insights(&config, store.clone(), Arc::new(EchoPages), text)
        .await
        .unwrap();

    assert_eq!(outcome.summary().considered(), &3);
    assert_eq!(outcome.summary().succeeded(), &2);
    assert_eq!(outcome.summary().failed(), &1);
    assert_eq!(
        sorted_keys(store.as_ref(), "insights").await,
        vec![
            "consolidado_insights.md",
            "topico_golpe_do_site_1.md",
            "topico_golpe_do_site_3.md",
        ]
    );
    let consolidated = store
        .get_text("insights", CONSOLIDATED_INSIGHTS_KEY)
        .await
        .unwrap();
    assert!(consolidated.starts_with("# Consolidado"));
}

#[tokio::test]
async fn test_scripts_skip_consolidated_and_existing_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), &[]);
    let store = open_store(&config).unwrap();
    let text = Arc::new(PipelineText::default());
    run_insights(&config, store.clone(), Arc::new(EchoPages), text.clone())
        .await
        .unwrap();

    let first = run_scripts(&config, store.clone(), text.clone()).await.unwrap();
    assert_eq!(first.summary().considered(), &3);
    assert_eq!(first.summary().succeeded(), &3);
    assert_eq!(
        sorted_keys(store.as_ref(), "roteiros").await,
        vec![
            "roteiro_golpe_do_site_1.md",
            "roteiro_golpe_do_site_2.md",
            "roteiro_golpe_do_site_3.md",
        ]
    );

    let calls = text.calls();
    let second = run_scripts(&config, store.clone(), text.clone()).await.unwrap();
    assert_eq!(second.summary().already_satisfied(), &3);
    assert_eq!(second.summary().attempted(), &0);
    assert_eq!(text.calls(), calls);
}

#[tokio::test]
async fn test_pills_without_infographics_respect_the_cap() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), &[("MAX_PILLS_PER_RUN", "2")]);
    let store = open_store(&config).unwrap();
    let text = Arc::new(PipelineText::default());
    run_insights(&config, store.clone(), Arc::new(EchoPages), text.clone())
        .await
        .unwrap();

    let outcome = run_pills(&config, store.clone(), text, Arc::new(NoInfographics))
        .await
        .unwrap();

    assert_eq!(outcome.summary().considered(), &3);
    assert_eq!(outcome.summary().attempted(), &2);
    assert_eq!(
        sorted_keys(store.as_ref(), "pilulas").await,
        vec!["pilula_golpe_do_site_1.json", "pilula_golpe_do_site_2.json"]
    );
    assert!(store.list("infograficos").await.map(|keys| keys.is_empty()).unwrap_or(true));

    let pill: serde_json::Value = serde_json::from_str(
        &store
            .get_text("pilulas", "pilula_golpe_do_site_1.json")
            .await
            .unwrap(),
    )
    .unwrap();
    assert_eq!(pill["title"], "Proteja seus códigos");
    assert_eq!(pill["source_insight"], "topico_golpe_do_site_1.md");
    assert_eq!(pill["call_to_action"]["type"], "question");
    assert!(pill["infographic_filename"].is_null());
}

#[tokio::test]
async fn test_videos_follow_the_scenes_of_each_script() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path(), &[("MAX_VIDEOS_PER_RUN", "1")]);
    let store = open_store(&config).unwrap();
    let text = Arc::new(PipelineText::default());
    run_insights(&config, store.clone(), Arc::new(EchoPages), text.clone())
        .await
        .unwrap();
    run_scripts(&config, store.clone(), text).await.unwrap();

    let video = Arc::new(InstantVideo::new(VideoBackend::ai_studio()));
    let outcome = run_videos(&config, store.clone(), video.clone(), CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(outcome.summary().considered(), &3);
    assert_eq!(outcome.summary().succeeded(), &1);
    assert_eq!(
        sorted_keys(store.as_ref(), "aulas-inclusao-digital").await,
        vec!["roteiro_golpe_do_site_1.mp4"]
    );
    // Two scenes: the initial clip and one extension, despite three requested.
    assert_eq!(
        video.prompts(),
        vec!["Uma senhora atende o telefone.", "Close na tela do celular."]
    );

    let rerun = run_videos(&config, store.clone(), video.clone(), CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(rerun.summary().already_satisfied(), &1);
    assert_eq!(rerun.summary().succeeded(), &1);
}
