//! Capability fakes shared by the pipeline tests.

#![allow(dead_code)]

use async_trait::async_trait;
use lumina_error::{GenerationError, GenerationErrorKind, LuminaResult};
use lumina_interface::{ContentExtractor, ImageGenerator, TextGenerator};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

type Reply = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Text generator answering from a closure; `None` becomes an API error.
pub struct ScriptedText {
    reply: Box<Reply>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedText {
    pub fn new(reply: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Self {
        Self {
            reply: Box::new(reply),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_concurrency(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedText {
    async fn generate(&self, prompt: &str) -> LuminaResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        (self.reply)(prompt).ok_or_else(|| {
            GenerationError::new(GenerationErrorKind::ApiRequest("scripted failure".into())).into()
        })
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-1"
    }
}

/// Extractor returning fixed page text for every URL.
pub struct StaticPages;

#[async_trait]
impl ContentExtractor for StaticPages {
    async fn extract(&self, url: &str) -> LuminaResult<String> {
        Ok(format!("Texto completo da página {}", url))
    }
}

/// Image generator returning fixed bytes, or nothing.
pub struct FixedImage(pub Option<Vec<u8>>);

#[async_trait]
impl ImageGenerator for FixedImage {
    async fn generate_image(&self, _prompt: &str) -> Option<Vec<u8>> {
        self.0.clone()
    }
}

pub fn text(reply: impl Fn(&str) -> Option<String> + Send + Sync + 'static) -> Arc<ScriptedText> {
    Arc::new(ScriptedText::new(reply))
}
