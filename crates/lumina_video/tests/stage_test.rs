//! Video stage over stored scripts.

mod common;

use common::ScriptedVideo;
use lumina_core::{SourceHandle, SourceItem};
use lumina_interface::VideoBackend;
use lumina_storage::{MemoryStore, ObjectStore};
use lumina_video::{ChainConfig, VideoChain, VideoStage};
use std::sync::Arc;
use std::time::Duration;

const SCRIPT: &str = "\
## Cena 1
- Descrição visual: Senhora no sofá com o celular.
- Locução: Recebeu uma mensagem?
## Cena 2
- Descrição visual: Close na tela com um link.
- Locução: Não clique.
";

async fn seed(store: &MemoryStore, keys: &[&str]) -> Vec<SourceItem> {
    let mut items = Vec::new();
    for (i, key) in keys.iter().enumerate() {
        store
            .put("roteiros", key, SCRIPT.as_bytes().to_vec(), "text/markdown")
            .await
            .unwrap();
        items.push(SourceItem::new(
            i + 1,
            SourceHandle::Stored {
                scope: "roteiros".into(),
                key: key.to_string(),
            },
        ));
    }
    items
}

fn stage(store: Arc<MemoryStore>, video: Arc<ScriptedVideo>) -> VideoStage {
    let config = ChainConfig::builder()
        .extensions(5usize)
        .poll_interval(Duration::from_secs(1))
        .build()
        .unwrap();
    let chain = VideoChain::new(video.clone(), config);
    VideoStage::new(store, video, chain, "videos")
}

#[tokio::test(start_paused = true)]
async fn test_videos_are_stored_and_skipped_on_rerun() {
    let store = Arc::new(MemoryStore::new());
    let scripts = seed(&store, &["roteiro_pix.md", "roteiro_senhas.md"]).await;
    let video = Arc::new(ScriptedVideo::new(VideoBackend::ai_studio()));
    let stage = stage(store.clone(), video.clone());

    let first = stage.run(scripts.clone()).await;
    assert_eq!(first.summary().succeeded(), &2);
    assert_eq!(video.started().len(), 4);
    assert_eq!(
        store.get("videos", "roteiro_pix.mp4").await.unwrap(),
        b"bytes of clip-1".to_vec()
    );
    assert_eq!(
        store.content_type("videos", "roteiro_pix.mp4").as_deref(),
        Some("video/mp4")
    );

    let second = stage.run(scripts).await;
    assert_eq!(second.summary().already_satisfied(), &2);
    assert_eq!(second.summary().attempted(), &0);
    assert_eq!(video.started().len(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_partial_clip_is_saved_on_failure() {
    let store = Arc::new(MemoryStore::new());
    let scripts = seed(&store, &["roteiro_pix.md"]).await;
    let video = Arc::new(ScriptedVideo::new(VideoBackend::ai_studio()).failing_at(1));

    let outcome = stage(store.clone(), video).run(scripts).await;

    assert_eq!(outcome.summary().failed(), &1);
    let record = &outcome.records()[0];
    assert!(*record.persisted());
    assert!(record.error().is_some());
    assert_eq!(
        store.get("videos", "roteiro_pix.mp4").await.unwrap(),
        b"bytes of clip-0".to_vec()
    );
}

#[tokio::test(start_paused = true)]
async fn test_max_videos_caps_the_run() {
    let store = Arc::new(MemoryStore::new());
    let scripts = seed(&store, &["roteiro_a.md", "roteiro_b.md", "roteiro_c.md"]).await;
    let video = Arc::new(ScriptedVideo::new(VideoBackend::vertex_ai()));

    let outcome = stage(store.clone(), video.clone())
        .with_max_videos(Some(1))
        .run(scripts)
        .await;

    assert_eq!(outcome.summary().attempted(), &1);
    assert_eq!(outcome.records()[0].video_key(), "roteiro_a.mp4");
    assert_eq!(video.started().len(), 1);
    assert_eq!(store.len("videos"), 1);
}
