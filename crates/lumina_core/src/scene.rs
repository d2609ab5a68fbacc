//! Scene prompts extracted from video scripts.

use serde::{Deserialize, Serialize};

/// One scene of a script: its ordinal and the visual description that
/// drives one video-generation step.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct ScenePrompt {
    /// 1-based scene ordinal
    ordinal: usize,
    /// Visual description text
    text: String,
}

impl ScenePrompt {
    /// Create a scene prompt.
    pub fn new(ordinal: usize, text: impl Into<String>) -> Self {
        Self {
            ordinal,
            text: text.into(),
        }
    }
}

impl From<(usize, &str)> for ScenePrompt {
    fn from((ordinal, text): (usize, &str)) -> Self {
        Self::new(ordinal, text)
    }
}
