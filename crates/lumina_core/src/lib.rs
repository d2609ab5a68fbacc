//! Core data types for the Lumina content pipeline.
//!
//! This crate holds the values that flow between pipeline stages (source
//! items, processing results, pill packages, scene prompts, run summaries)
//! and the deterministic naming rules that let repeated runs recognise
//! outputs they already produced.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod artifact;
mod pill;
mod result;
mod scene;
mod slug;
mod source;
mod summary;

pub use artifact::ArtifactKind;
pub use pill::{
    AccessibilityMetadata, CallToAction, CallToActionKind, PillContent, PillDocument,
    PillDocumentBuilder,
};
pub use result::ProcessingResult;
pub use scene::ScenePrompt;
pub use slug::{
    CONSOLIDATED_INSIGHTS_KEY, derive_key, extract_title, file_stem, output_name, truncate_chars,
};
pub use source::{SourceHandle, SourceItem};
pub use summary::RunSummary;
