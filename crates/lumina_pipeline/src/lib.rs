//! Content generation pipeline for Lumina.
//!
//! This crate turns source items into generated artifacts:
//! - [`InsightProcessor`]: scraped page to markdown insight
//! - [`ScriptProcessor`]: insight to multi-scene video script
//! - [`PillProcessor`]: insight to knowledge pill with optional infographic
//!
//! Processors implement [`ItemProcessor`] and are driven by the
//! [`Orchestrator`], which computes the backlog, fans items out to a bounded
//! pool of tasks and persists results sequentially through a [`ResultSink`].
//!
//! Capabilities (text, image, storage) are injected as `Arc<dyn Trait>`
//! handles, so every stage can run against fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod consolidation;
mod orchestrator;
mod processor;
mod processors;
mod prompts;
mod sink;

pub use consolidation::{consolidate, consolidation_input, load_context};
pub use orchestrator::{
    Backlog, Orchestrator, OrchestratorConfig, OrchestratorConfigBuilder, StageOutcome,
};
pub use processor::ItemProcessor;
pub use processors::{InsightProcessor, PillProcessor, ScriptProcessor};
pub use prompts::{
    CONSOLIDATION_CONTENT_LIMIT, CONTEXT_LIMIT, INFOGRAPHIC_TEXT_LIMIT, INSIGHT_CONTENT_LIMIT,
    PILL_CONTENT_LIMIT, SCRIPT_CONTENT_LIMIT, clean_generated, consolidation_prompt,
    infographic_prompt, insight_prompt, pill_call_to_action_prompt, pill_short_text_prompt,
    pill_title_prompt, script_prompt,
};
pub use sink::{MarkdownSink, PillSink, ResultSink};
