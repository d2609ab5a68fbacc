//! Scripted video backend for the chain and stage tests.

#![allow(dead_code)]

use async_trait::async_trait;
use lumina_error::LuminaResult;
use lumina_interface::{ClipHandle, OperationHandle, OperationStatus, VideoBackend, VideoGenerator};
use std::collections::HashMap;
use std::sync::Mutex;

/// One started operation: the clip it extends (if any) and its prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Started {
    pub source_clip: Option<String>,
    pub prompt: String,
}

/// Video backend whose operations finish after a fixed number of polls.
///
/// Operation `n` (0 is the initial clip) produces clip `clip-n`, unless it
/// is listed in `failing`.
pub struct ScriptedVideo {
    backend: VideoBackend,
    pending_polls: usize,
    failing: Vec<usize>,
    never_finish: bool,
    started: Mutex<Vec<Started>>,
    polls: Mutex<HashMap<String, usize>>,
}

impl ScriptedVideo {
    pub fn new(backend: VideoBackend) -> Self {
        Self {
            backend,
            pending_polls: 2,
            failing: Vec::new(),
            never_finish: false,
            started: Mutex::new(Vec::new()),
            polls: Mutex::new(HashMap::new()),
        }
    }

    pub fn failing_at(mut self, operation: usize) -> Self {
        self.failing.push(operation);
        self
    }

    pub fn never_finishing(mut self) -> Self {
        self.never_finish = true;
        self
    }

    pub fn started(&self) -> Vec<Started> {
        self.started.lock().unwrap().clone()
    }

    fn start(&self, source_clip: Option<String>, prompt: &str) -> OperationHandle {
        let mut started = self.started.lock().unwrap();
        let name = format!("operations/{}", started.len());
        started.push(Started {
            source_clip,
            prompt: prompt.to_string(),
        });
        OperationHandle::new(name)
    }
}

#[async_trait]
impl VideoGenerator for ScriptedVideo {
    fn backend(&self) -> &VideoBackend {
        &self.backend
    }

    async fn start_video(&self, prompt: &str) -> LuminaResult<OperationHandle> {
        Ok(self.start(None, prompt))
    }

    async fn start_extension(
        &self,
        clip: &ClipHandle,
        prompt: &str,
    ) -> LuminaResult<OperationHandle> {
        Ok(self.start(Some(clip.uri.clone()), prompt))
    }

    async fn poll(&self, operation: &OperationHandle) -> LuminaResult<OperationStatus> {
        let mut polls = self.polls.lock().unwrap();
        let count = polls.entry(operation.name.clone()).or_default();
        *count += 1;
        if self.never_finish || *count <= self.pending_polls {
            return Ok(OperationStatus::Pending);
        }

        let index: usize = operation
            .name
            .rsplit('/')
            .next()
            .and_then(|n| n.parse().ok())
            .unwrap_or_default();
        if self.failing.contains(&index) {
            Ok(OperationStatus::Error(format!("code 13: operation {} failed", index)))
        } else {
            Ok(OperationStatus::Done(ClipHandle::new(format!("clip-{}", index))))
        }
    }

    async fn download(&self, clip: &ClipHandle) -> LuminaResult<Vec<u8>> {
        Ok(format!("bytes of {}", clip.uri).into_bytes())
    }
}
