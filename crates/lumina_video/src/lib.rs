//! Video generation from scripts for Lumina.
//!
//! - [`parse_scenes`] splits a script into ordered scene prompts
//! - [`VideoChain`] turns scene prompts into one video: an initial clip
//!   followed by chained extensions, each waiting on a long-running operation
//! - [`VideoStage`] runs the chain for every script lacking a video and
//!   stores the result
//!
//! Backends that cannot extend clips are detected through their
//! [`VideoBackend`](lumina_interface::VideoBackend) descriptor, and the chain
//! then stops after the initial clip.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chain;
mod scenes;
mod stage;

pub use chain::{ChainConfig, ChainConfigBuilder, ChainOutcome, ChainState, VideoChain};
pub use scenes::{FALLBACK_SCENE_CHARS, parse_scenes};
pub use stage::{VideoRecord, VideoStage, VideoStageOutcome, video_key};
pub use tokio_util::sync::CancellationToken;
