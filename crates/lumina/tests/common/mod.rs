//! Capability fakes for the stage tests.

#![allow(dead_code)]

use async_trait::async_trait;
use lumina::{
    ClipHandle, ContentExtractor, GenerationError, GenerationErrorKind, LuminaResult,
    OperationHandle, OperationStatus, TextGenerator, VideoBackend, VideoGenerator,
};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Text generator answering every prompt of the pipeline by its wording.
///
/// Insights are titled after the `site-N` segment of the page URL; pages
/// listed in `failing_sites` get an API error instead.
#[derive(Default)]
pub struct PipelineText {
    failing_sites: Vec<usize>,
    calls: AtomicUsize,
}

impl PipelineText {
    pub fn failing_site(mut self, site: usize) -> Self {
        self.failing_sites.push(site);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn insight(&self, prompt: &str) -> Option<String> {
        let site = prompt
            .split("site-")
            .nth(1)?
            .chars()
            .take_while(char::is_ascii_digit)
            .collect::<String>()
            .parse::<usize>()
            .ok()?;
        (!self.failing_sites.contains(&site))
            .then(|| format!("# Golpe do site {}\n\nNunca compartilhe códigos recebidos.", site))
    }
}

#[async_trait]
impl TextGenerator for PipelineText {
    async fn generate(&self, prompt: &str) -> LuminaResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = if prompt.contains("ROTEIRO DE VÍDEO") {
            Some(
                "# Roteiro: Golpe\n\n## Cena 1\n- Descrição visual: Uma senhora atende o telefone.\n- Locução: Cuidado.\n\n## Cena 2\n- Descrição visual: Close na tela do celular.\n- Locução: Desligue.\n"
                    .to_string(),
            )
        } else if prompt.contains("Insights para consolidar") {
            Some("# Consolidado de Insights\n\nGolpes por telefone.".to_string())
        } else if prompt.contains("TITULO CURTO") {
            Some("\"Proteja seus códigos\"".to_string())
        } else if prompt.contains("TEXTO CURTO") {
            Some("Nunca passe códigos por telefone. Desligue e ligue para o banco.".to_string())
        } else if prompt.contains("pergunta de chamada") {
            Some("Você já recebeu uma ligação assim?".to_string())
        } else {
            self.insight(prompt)
        };

        reply.ok_or_else(|| {
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

/// Extractor returning the URL inside some page text.
pub struct EchoPages;

#[async_trait]
impl ContentExtractor for EchoPages {
    async fn extract(&self, url: &str) -> LuminaResult<String> {
        Ok(format!("Conteúdo da página {}", url))
    }
}

/// Video backend whose operations are done on the first poll.
pub struct InstantVideo {
    backend: VideoBackend,
    prompts: Mutex<Vec<String>>,
}

impl InstantVideo {
    pub fn new(backend: VideoBackend) -> Self {
        Self {
            backend,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn start(&self, prompt: &str) -> OperationHandle {
        let mut prompts = self.prompts.lock().unwrap();
        prompts.push(prompt.to_string());
        OperationHandle::new(format!("operations/{}", prompts.len() - 1))
    }
}

#[async_trait]
impl VideoGenerator for InstantVideo {
    fn backend(&self) -> &VideoBackend {
        &self.backend
    }

    async fn start_video(&self, prompt: &str) -> LuminaResult<OperationHandle> {
        Ok(self.start(prompt))
    }

    async fn start_extension(
        &self,
        _clip: &ClipHandle,
        prompt: &str,
    ) -> LuminaResult<OperationHandle> {
        Ok(self.start(prompt))
    }

    async fn poll(&self, operation: &OperationHandle) -> LuminaResult<OperationStatus> {
        Ok(OperationStatus::Done(ClipHandle::new(operation.name.replace("operations/", "clip-"))))
    }

    async fn download(&self, clip: &ClipHandle) -> LuminaResult<Vec<u8>> {
        Ok(format!("mp4 {}", clip.uri).into_bytes())
    }
}
