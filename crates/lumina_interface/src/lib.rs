//! Capability traits for the Lumina content pipeline.
//!
//! The pipeline never talks to a provider SDK directly. Generation, storage
//! and source enumeration are reached through the traits in this crate, and
//! concrete clients are constructed once per run and injected.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod preflight;
mod traits;
mod types;

pub use preflight::{PreflightCheck, PreflightReport};
pub use traits::{
    ContentExtractor, ImageGenerator, ObjectStore, SourceEnumerator, TextGenerator,
    VideoGenerator,
};
pub use types::{ClipHandle, OperationHandle, OperationStatus, VideoBackend, VideoBackendMode};
